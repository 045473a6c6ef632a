//! Fan-out of engine output to any number of subscribers.

use parking_lot::Mutex;

use crate::actor::{Receiver, Sender, channel};

/// Clones each event to every live subscriber. Subscribers that went away
/// are dropped on the next send.
pub struct Broadcaster<Event> {
    subscribers: Mutex<Vec<Sender<Event>>>,
}

impl<Event> Default for Broadcaster<Event> {
    fn default() -> Self {
        Broadcaster {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<Event: Clone> Broadcaster<Event> {
    pub fn new() -> Broadcaster<Event> { Broadcaster::default() }

    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn send(&self, event: Event) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|subscriber| subscriber.try_send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize { self.subscribers.lock().len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_event() {
        let broadcaster = Broadcaster::new();
        let mut a = broadcaster.subscribe();
        let mut b = broadcaster.subscribe();

        broadcaster.send(1u32);
        broadcaster.send(2u32);

        assert_eq!(a.try_recv().unwrap().1, 1);
        assert_eq!(a.try_recv().unwrap().1, 2);
        assert_eq!(b.try_recv().unwrap().1, 1);
        assert_eq!(b.try_recv().unwrap().1, 2);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let broadcaster = Broadcaster::new();
        let rx = broadcaster.subscribe();
        let _live = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(rx);
        broadcaster.send(1u32);
        assert_eq!(broadcaster.subscriber_count(), 1);
    }
}
