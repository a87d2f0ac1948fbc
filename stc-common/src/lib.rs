//! Script-to-TAC Translator - Common Types and Errors
//!
//! This crate contains the shared identifier types and the error type
//! used across all components of the translator.

pub mod error;
pub mod types;

pub use error::TranslationError;
pub use types::{label_name, temp_name, LabelId, TempId};

#[cfg(test)]
mod tests {
    // The naming helpers are consumed from the crate root by every
    // downstream crate; keep them reachable there.
    #[test]
    fn test_root_reexports_naming_helpers() {
        assert_eq!(crate::label_name(2), "L2");
        assert_eq!(crate::temp_name(5), "t5");
    }
}
