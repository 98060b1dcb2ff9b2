//! cm-messages
//!
//! User-facing text for the cm CLI: message templates grouped by domain and a
//! small builder for `{variable}` substitution.

pub mod builder;
pub mod macros;
pub mod messages;
