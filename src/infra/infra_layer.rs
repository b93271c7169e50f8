// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "knowledge/mod.rs"]
pub mod knowledge;

#[path = "message_log/mod.rs"]
pub mod message_log;

#[path = "telegram/mod.rs"]
pub mod telegram;

#[path = "ai/mod.rs"]
pub mod ai;
