pub mod commands;
pub mod engine_thread;
pub mod event_log;
pub mod handle;
pub mod osc;
pub mod rng;
pub mod scheduler;
pub mod sink;
pub mod transport;

pub use commands::EngineCmd;
pub use event_log::{replay, EventLog, EventLogError, LoggedSink};
pub use handle::{EngineHandle, EngineReadState, EngineSettings};
pub use osc::OscSink;
pub use rng::{Lcg, RandomSource, Scripted};
pub use scheduler::{schedule_measure, DEFAULT_BASE_OCTAVE};
pub use sink::{NoteSink, RecordingSink, SinkOp};
pub use transport::{Transport, TransportError, DEFAULT_BPM};
