// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "knowledge/mod.rs"]
pub mod knowledge;

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "messaging/mod.rs"]
pub mod messaging;

#[path = "responder/mod.rs"]
pub mod responder;
