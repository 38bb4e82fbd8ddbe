//! Length section - cumulative length thresholds.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::types::Criterion;

const LENGTH_TIERS: [(usize, Criterion); 3] = [
    (8, Criterion::MinLength8),
    (12, Criterion::MinLength12),
    (16, Criterion::MinLength16),
];

/// Checks the password against each length tier.
///
/// Length is counted in characters, not bytes.
pub fn length_section(password: &SecretString) -> SectionResult {
    let len = password.expose_secret().chars().count();
    LENGTH_TIERS
        .iter()
        .map(|(min, criterion)| (*criterion, len >= *min))
        .collect()
}
