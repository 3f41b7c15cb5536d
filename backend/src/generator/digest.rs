//! Schedule digest
//!
//! SHA-256 over the JSON encoding of a generated schedule. Two runs with the
//! same configuration and seed produce the same digest.

use crate::models::FlightLeg;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the legs' JSON encoding
///
/// Field order is fixed by the struct declaration, so the encoding needs no
/// canonicalization.
pub fn schedule_digest(legs: &[FlightLeg]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(legs)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_digest() {
        // sha256("[]")
        assert_eq!(
            schedule_digest(&[]).unwrap(),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }
}
