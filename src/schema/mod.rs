//! Schema validation.
//!
//! Strict at the content boundary: a card that breaks the cost table or its
//! type's effect shape is rejected with an error naming the card. The same
//! checks run again over the whole game state after every transition.
//!
//! ## Effect shapes by type
//!
//! - ATTACK: one opponent IP loss of the table magnitude, plus an optional
//!   random opponent discard (rare: 1, legendary: 1 or 2, otherwise none)
//! - MEDIA: one truth change of the table magnitude, either direction
//! - ZONE: one positive pressure of the table magnitude on the target
//! - DEFENSIVE: `immune`/`blockAttack` flags, IP, draws and discards only

mod validator;

pub use validator::{assert_state, validate, validate_pool};
