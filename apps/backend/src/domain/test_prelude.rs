use proptest::prelude::ProptestConfig;

/// Shared proptest configuration for domain property tests.
///
/// `PROPTEST_CASES` overrides the default case count.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(256);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
