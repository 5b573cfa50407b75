//! Events emitted by the engine.
//!
//! The engine returns events from each call instead of invoking callbacks,
//! so rule transitions stay independent of whatever renders them.

pub mod event;

pub use event::{BonusReason, GameEvent};
