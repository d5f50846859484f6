//! Store identifier checks
//!
//! Identifiers travel as the 24-character hex form of a MongoDB ObjectId.
//! `validate_ids` only looks at length; `parse_id` does the hex decoding.

use bson::oid::ObjectId;

/// Length of the canonical string form of an ObjectId
pub const OBJECT_ID_LEN: usize = 24;

/// Returns true when every candidate has exactly the canonical length.
///
/// Zero candidates is vacuously valid. Character content is not inspected.
///
/// # Example
/// ```
/// use todolists_server::models::validate_ids;
///
/// assert!(validate_ids(&[]));
/// assert!(validate_ids(&["5c6b1d7e9f1b2a3c4d5e6f70"]));
/// assert!(!validate_ids(&["too-short"]));
/// ```
pub fn validate_ids(ids: &[&str]) -> bool {
    ids.iter().all(|id| id.chars().count() == OBJECT_ID_LEN)
}

/// Decode a length-checked candidate. `None` when it is not valid hex.
pub fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_candidates_are_valid() {
        assert!(validate_ids(&[]));
    }

    #[test]
    fn single_candidate_length() {
        assert!(validate_ids(&["a".repeat(24).as_str()]));
        assert!(!validate_ids(&["a".repeat(23).as_str()]));
        assert!(!validate_ids(&["a".repeat(25).as_str()]));
        assert!(!validate_ids(&[""]));
    }

    #[test]
    fn every_candidate_must_match() {
        assert!(validate_ids(&["a".repeat(24).as_str(), "b".repeat(24).as_str()]));
        assert!(!validate_ids(&["a".repeat(24).as_str(), "b".repeat(23).as_str()]));
        assert!(!validate_ids(&["a".repeat(23).as_str(), "b".repeat(24).as_str()]));
    }

    #[test]
    fn content_is_not_inspected() {
        // Not hex, still the right length
        assert!(validate_ids(&["z".repeat(24).as_str()]));
        assert!(parse_id("z".repeat(24).as_str()).is_none());
    }

    #[test]
    fn parses_generated_ids() {
        let oid = ObjectId::new();
        let hex = oid.to_hex();
        assert!(validate_ids(&[hex.as_str()]));
        assert_eq!(parse_id(&hex), Some(oid));
    }
}
