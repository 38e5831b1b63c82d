//! ID generation for board entities
//!
//! Every entity on the board (column, task, checklist, check item, comment)
//! gets a globally unique string id at creation time, never reassigned.
//! Format: 12 lowercase alphanumeric chars.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Length of generated ids in characters
const ID_LEN: usize = 12;

/// Generate a unique resource ID
///
/// Uses UUID + timestamp hash, encoded as base32 lowercase. Collision
/// resistant without any coordination between callers.
pub fn generate_id() -> String {
    let uuid = Uuid::new_v4();
    let timestamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(uuid.as_bytes());
    hasher.update(timestamp.to_le_bytes());

    let hash = hasher.finalize();

    // 8 hash bytes give more than 12 base32 chars
    base32::encode(base32::Alphabet::Crockford, &hash[..8])
        .to_lowercase()
        .chars()
        .take(ID_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
