//! Ordered event emitter with sequence guarantees.
//!
//! One emitter exists per run; it stamps every event with the run ID and the
//! next sequence number before handing it to the bus.

use std::sync::atomic::{AtomicU64, Ordering};

use events::{Event, EventBus, EventEnvelope};
use tracing::trace;
use uuid::Uuid;

pub struct OrderedEventEmitter {
    bus: EventBus,
    run_id: Uuid,
    sequence: AtomicU64,
}

impl OrderedEventEmitter {
    pub fn new(bus: EventBus, run_id: Uuid) -> Self {
        Self {
            bus,
            run_id,
            sequence: AtomicU64::new(0),
        }
    }

    /// Emit an event with the next sequence number, returning that number.
    ///
    /// Events without subscribers are dropped.
    pub fn emit(&self, event: Event) -> u64 {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        trace!(run_id = %self.run_id, seq, event = ?event.phase(), "Emitting event");
        self.bus.publish(EventEnvelope::new(self.run_id, seq, event));
        seq
    }

    /// Number of events emitted so far.
    pub fn emitted(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_increments() {
        let emitter = OrderedEventEmitter::new(EventBus::new(), Uuid::new_v4());

        assert_eq!(emitter.emitted(), 0);
        assert_eq!(emitter.emit(Event::RunStarted), 0);
        assert_eq!(emitter.emit(Event::UrlDiscarded), 1);
        assert_eq!(emitter.emitted(), 2);
    }

    #[tokio::test]
    async fn test_envelopes_carry_run_id() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let run_id = Uuid::new_v4();
        let emitter = OrderedEventEmitter::new(bus, run_id);

        emitter.emit(Event::RunStarted);
        let envelope = rx.recv().await.unwrap();

        assert_eq!(envelope.run_id, run_id);
        assert_eq!(envelope.sequence, 0);
    }

    #[test]
    fn test_separate_runs_have_independent_sequences() {
        let bus = EventBus::new();
        let first = OrderedEventEmitter::new(bus.clone(), Uuid::new_v4());
        let second = OrderedEventEmitter::new(bus, Uuid::new_v4());

        first.emit(Event::RunStarted);
        first.emit(Event::UrlDiscarded);
        assert_eq!(second.emit(Event::RunStarted), 0);
    }
}
