//! Deterministic seeds derived from test names.
//!
//! Seeds are stable across runs and platforms so a failing seeded game can be
//! replayed, while distinct test names still get distinct dice and AI streams.

/// Derive a 64-bit seed from a test name.
///
/// ```
/// use backend_test_support::seeds::test_seed;
///
/// assert_eq!(test_seed("full_match"), test_seed("full_match"));
/// assert_ne!(test_seed("full_match"), test_seed("other_match"));
/// ```
pub fn test_seed(test_name: &str) -> u64 {
    let hash = blake3::hash(test_name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Derive a seed for one participant (dice source, seat, advisor) of a test.
pub fn participant_seed(test_name: &str, participant: &str) -> u64 {
    test_seed(&format!("{test_name}::{participant}"))
}
