pub mod replies;
pub mod responder_models;
pub mod responder_service;

pub use responder_models::{InboundMessage, LogStoreError, MessageLog, MessageLogStore};
pub use responder_service::ResponderService;
