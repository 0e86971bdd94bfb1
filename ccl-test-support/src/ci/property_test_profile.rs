//! Property-test run profile parsing for CI and local overrides.
//!
//! Every proptest suite in the workspace reads its budget through this
//! module so one environment variable scales them all.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const CCL_PBT_CASES_ENV_KEY: &str = "CCL_PBT_CASES";
/// Environment variable overriding the shrink iteration cap.
pub const CCL_PBT_MAX_SHRINK_ENV_KEY: &str = "CCL_PBT_MAX_SHRINK_ITERS";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    max_shrink_iters: Option<u32>,
}

impl ProptestRunProfile {
    /// Loads a profile from the environment, falling back to `default_cases`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ccl_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = read_env(CCL_PBT_CASES_ENV_KEY).unwrap_or(default_cases);
        let max_shrink_iters = read_env(CCL_PBT_MAX_SHRINK_ENV_KEY);
        Self {
            cases,
            max_shrink_iters,
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Shrink iteration cap, when overridden.
    #[must_use]
    pub fn max_shrink_iters(&self) -> Option<u32> {
        self.max_shrink_iters
    }
}

fn read_env(key: &'static str) -> Option<u32> {
    let raw = env::var(key).ok()?;
    match parse_positive(&raw) {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "invalid property-test profile override; using default",
            );
            None
        }
    }
}

fn parse_positive(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("value must be > 0".to_owned());
    }
    Ok(parsed)
}
