//! ID generation utilities.

use uuid::Uuid;

/// Generates a new time-ordered identifier.
///
/// Every stored entity (project, folder, request, environment, rule, saved
/// snippet) is keyed by one of these.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Returns true when `id` parses as a UUID.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_generate_id_uniqueness() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid_id("not-an-id"));
    }
}
