//! Event channel built on crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the engine
///
/// Cheap to clone. Sending never blocks and never fails: if the receiver is
/// gone the event is discarded.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving half held by a UI layer
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Iterate until every sender has been dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Take an event if one is queued
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }
}

/// Factory for sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded channel
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender whose receiver is already gone
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{PipelineEvent, PipelinePhase, WalkEvent, WalkProgress};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn progress_crosses_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Walk(WalkEvent::Progress(WalkProgress {
                files_hashed: 3,
                directories_visited: 2,
                bytes_hashed: 15,
                current_path: PathBuf::from("a/x.txt"),
            })));
        });
        handle.join().unwrap();

        let events: Vec<_> = receiver.iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::Walk(WalkEvent::Progress(p)) => assert_eq!(p.files_hashed, 3),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn null_sender_discards_silently() {
        let sender = null_sender();
        sender.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Indexing,
        }));
    }

    #[test]
    fn try_recv_on_empty_channel() {
        let (_sender, receiver) = EventChannel::new();
        assert!(receiver.try_recv().is_none());
    }
}
