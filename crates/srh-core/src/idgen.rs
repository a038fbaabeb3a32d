//! SHA256 + base36 rule ID generation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Prefix of generated rule IDs.
pub const RULE_ID_PREFIX: &str = "r";

/// Number of base36 characters after the prefix.
pub const RULE_ID_LENGTH: usize = 6;

/// Converts a byte slice to a base36 string of exactly `length` characters.
///
/// Short results are zero-padded; long results keep the least significant
/// digits.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let mut num = BigUint::from_bytes_be(data);
    let base = BigUint::from(36u32);

    let mut digits: Vec<char> = Vec::with_capacity(length);
    while !num.is_zero() {
        let rem = (&num % &base).to_usize().unwrap_or(0);
        num /= &base;
        digits.push(char::from(BASE36_ALPHABET[rem]));
    }
    digits.resize(digits.len().max(length), '0');
    digits.truncate(length);
    digits.iter().rev().collect()
}

/// Creates a hash-based rule ID such as `r-0k3x9a`.
pub fn generate_rule_id(name: &str, timestamp: DateTime<Utc>, nonce: u32) -> String {
    let content = format!(
        "{}|{}|{}",
        name,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );
    let hash = Sha256::digest(content.as_bytes());
    // 5 bytes = 40 bits, enough for 6 base36 chars (~31 bits).
    format!(
        "{}-{}",
        RULE_ID_PREFIX,
        encode_base36(&hash[..5], RULE_ID_LENGTH)
    )
}

/// Generates a rule ID not present in `existing`, bumping the nonce on clash.
pub fn unique_rule_id(existing: &HashSet<&str>, name: &str, timestamp: DateTime<Utc>) -> String {
    let mut nonce = 0u32;
    loop {
        let id = generate_rule_id(name, timestamp, nonce);
        if !existing.contains(id.as_str()) {
            return id;
        }
        nonce += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    #[test]
    fn encode_base36_pads() {
        assert_eq!(encode_base36(&[], 4), "0000");
        assert_eq!(encode_base36(&[35], 3), "00z");
        assert_eq!(encode_base36(&[36], 2), "10");
    }

    #[test]
    fn encode_base36_truncates_to_low_digits() {
        // 36^2 + 5 = 1301 = 0x0515 -> "105"
        assert_eq!(encode_base36(&[0x05, 0x15], 2), "05");
        assert_eq!(encode_base36(&[0x05, 0x15], 3), "105");
    }

    #[test]
    fn rule_id_shape() {
        let id = generate_rule_id("Overdue", ts(), 0);
        assert!(id.starts_with("r-"));
        assert_eq!(id.len(), 2 + RULE_ID_LENGTH);
        assert!(id[2..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn rule_id_is_deterministic() {
        assert_eq!(
            generate_rule_id("Overdue", ts(), 0),
            generate_rule_id("Overdue", ts(), 0)
        );
        assert_ne!(
            generate_rule_id("Overdue", ts(), 0),
            generate_rule_id("Overdue", ts(), 1)
        );
    }

    #[test]
    fn unique_rule_id_skips_existing() {
        let first = generate_rule_id("Dup", ts(), 0);
        let existing: HashSet<&str> = [first.as_str()].into_iter().collect();
        let id = unique_rule_id(&existing, "Dup", ts());
        assert_ne!(id, first);
        assert_eq!(id, generate_rule_id("Dup", ts(), 1));
    }
}
