// Shared test doubles. Only compiled for tests.

pub mod fakes;
pub mod log_capture;

pub use fakes::{FailingKnowledgeStore, InMemoryMessageLog, RecordingMessenger, ScriptedAiProvider};
pub use log_capture::LogCapture;
