use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use teloxide::types::ChatId;

/// In-memory subscription flags, lost on restart.
///
/// Entries are never removed; `/stop` only clears the flag. Handlers run on a
/// multi-threaded runtime, so access goes through a mutex that is never held
/// across an await.
#[derive(Default)]
pub struct SubscriberRegistry {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    order: Vec<ChatId>,
    active: HashMap<ChatId, bool>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or update; last write wins.
    pub fn set_subscribed(&self, chat: ChatId, active: bool) {
        let mut inner = self.lock();
        if inner.active.insert(chat, active).is_none() {
            inner.order.push(chat);
        }
    }

    /// Active chats in first-seen order.
    pub fn active(&self) -> Vec<ChatId> {
        let inner = self.lock();
        inner
            .order
            .iter()
            .filter(|chat| inner.active.get(*chat).copied().unwrap_or(false))
            .copied()
            .collect()
    }

    /// Number of known chats, subscribed or not.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let registry = SubscriberRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.active().is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn stop_keeps_entry_but_clears_flag() {
        let registry = SubscriberRegistry::new();
        registry.set_subscribed(ChatId(7), true);
        registry.set_subscribed(ChatId(7), false);

        assert_eq!(registry.len(), 1);
        assert!(!registry.active().contains(&ChatId(7)));
        assert!(registry.active().is_empty());
    }

    #[test]
    fn repeated_subscribe_is_idempotent() {
        let registry = SubscriberRegistry::new();
        registry.set_subscribed(ChatId(3), true);
        registry.set_subscribed(ChatId(3), true);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active(), vec![ChatId(3)]);
    }

    #[test]
    fn active_follows_first_insertion_order() {
        let registry = SubscriberRegistry::new();
        registry.set_subscribed(ChatId(30), true);
        registry.set_subscribed(ChatId(10), true);
        registry.set_subscribed(ChatId(20), false);
        registry.set_subscribed(ChatId(30), false);
        registry.set_subscribed(ChatId(20), true);
        registry.set_subscribed(ChatId(30), true);

        assert_eq!(registry.active(), vec![ChatId(30), ChatId(10), ChatId(20)]);
    }
}
