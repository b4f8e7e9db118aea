//! Property-test case counts with an environment override.
//!
//! CI raises the case count for nightly runs by exporting
//! `RENYI_PBT_CASES`; local runs keep each suite's default.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PBT_CASES_ENV_KEY: &str = "RENYI_PBT_CASES";

/// Resolved case count for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to `default_cases` when the override is
    /// absent or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use renyi_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(PBT_CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = PBT_CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    "invalid property-test case override; using default",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self {
            cases: cases.max(1),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
