//! Publish/subscribe channel for repository mutation events.
//!
//! Collaborators that change the working tree (content writes, item creation,
//! checkout, commit) publish a [`MutationEvent`]; branch views and the session
//! hold a [`Subscription`] and drain it before serving reads. Dropping a
//! subscription unregisters it.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    /// Working tree content or structure changed
    WorkingTreeModified,
    /// Working tree was reset to a clean state (checkout, discard, commit)
    WorkingTreeCleaned,
    BranchCreated { name: String },
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    senders: Vec<(u64, Sender<MutationEvent>)>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = channel();
        let mut subscribers = lock(&self.subscribers);
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.push((id, sender));

        Subscription {
            id,
            receiver,
            bus: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn publish(&self, event: MutationEvent) {
        let mut subscribers = lock(&self.subscribers);
        log::debug!(
            "Publishing {event:?} to {} subscribers",
            subscribers.senders.len()
        );
        // Send errors mean the receiving side is gone
        subscribers
            .senders
            .retain(|(_, sender)| sender.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).senders.len()
    }
}

pub struct Subscription {
    id: u64,
    receiver: Receiver<MutationEvent>,
    bus: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Take every event received since the last drain
    pub fn drain(&self) -> Vec<MutationEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.bus.upgrade() {
            lock(&subscribers).senders.retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock(subscribers: &Mutex<Subscribers>) -> MutexGuard<'_, Subscribers> {
    subscribers
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
