//! Identifier generation for records and sub-records.

use uuid::Uuid;

/// Generates a prefixed record id, e.g. `srv-1f2e3d4c`.
///
/// The suffix is the first 8 hex digits of a v4 UUID, giving 16^8 possible
/// values per prefix.
pub fn generate(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_prefix_and_suffix() {
        let id = generate("srv");
        assert!(id.starts_with("srv-"));
        assert_eq!(id.len(), "srv-".len() + 8);
        assert!(id["srv-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_is_unique() {
        let a = generate("dns");
        let b = generate("dns");
        assert_ne!(a, b);
    }
}
