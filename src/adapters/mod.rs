mod phase_events;

pub use phase_events::TracingPhaseEventEmitter;
