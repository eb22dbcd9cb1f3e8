//! Account management module.
//!
//! Provides the account model and registration validation.

mod model;
mod validation;

pub use model::{Account, AccountId, DEFAULT_RECENT_CONTACTS};
pub use validation::{ValidationError, ValidationResult, is_valid_email, validate_registration};
