//! Common identifier types used throughout the translator
//!
//! Temporaries and labels are drawn from two independent counters so their
//! names can never collide, regardless of how many of each a translation
//! allocates.

/// Label identifier, rendered as `L0`, `L1`, ...
pub type LabelId = u32;

/// Temporary identifier, rendered as `t0`, `t1`, ...
pub type TempId = u32;

/// Canonical spelling of a label.
pub fn label_name(id: LabelId) -> String {
    format!("L{}", id)
}

/// Canonical spelling of a temporary.
pub fn temp_name(id: TempId) -> String {
    format!("t{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_spellings() {
        assert_eq!(label_name(0), "L0");
        assert_eq!(temp_name(3), "t3");
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        // Same numeric id, different prefix.
        assert_ne!(label_name(7), temp_name(7));
    }
}
