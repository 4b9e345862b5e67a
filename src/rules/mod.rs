//! Turn/action engine and win evaluation.
//!
//! [`Engine`] owns the rules configuration and the explicit registries
//! (cards for `addCard`, special hooks, discard choice) and exposes the
//! state transitions: start turn, play, respond, end turn. [`WinResult`]
//! reports the first satisfied terminal condition.

mod engine;
pub mod win;

pub use engine::{EndTurnResult, EndTurnSummary, Engine, PlayCheck, PlayResult, PlayStatus};
pub use win::{WinReason, WinResult};
