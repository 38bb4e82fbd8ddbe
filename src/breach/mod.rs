//! Breach classification over a k-anonymity range lookup.
//!
//! Only the first [`PREFIX_LEN`] hex characters of the password's SHA-1 hash
//! are handed to a [`BreachLookup`]. The lookup answers with every known
//! suffix sharing that prefix; the exact match happens here, locally.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use data_encoding::HEXUPPER;
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

use crate::error::LookupError;
use crate::scoring::ALL_CRITERIA_MET_MESSAGE;
use crate::types::{BreachVerdict, PasswordScore, StrengthAssessment, StrengthLabel};

#[cfg(feature = "async")]
mod cache;
#[cfg(feature = "hibp")]
mod hibp;

#[cfg(feature = "async")]
pub use cache::CachedLookup;
#[cfg(feature = "hibp")]
pub use hibp::HibpClient;

pub const PREFIX_LEN: usize = 5;
pub const SUFFIX_LEN: usize = 40 - PREFIX_LEN;

/// Highest score a password found in a breach can keep.
pub const BREACHED_SCORE_CAP: i64 = 20;

/// Uppercase hex SHA-1 of a password.
///
/// `Debug` only shows the prefix; the full hash must not leave the process.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    hex: String,
}

impl PasswordHash {
    pub fn of(password: &SecretString) -> Self {
        let digest = Sha1::digest(password.expose_secret().as_bytes());
        Self {
            hex: HEXUPPER.encode(digest.as_slice()),
        }
    }

    pub fn prefix(&self) -> HashPrefix {
        HashPrefix(self.hex[..PREFIX_LEN].to_string())
    }

    pub fn suffix(&self) -> &str {
        &self.hex[PREFIX_LEN..]
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordHash({}…)", &self.hex[..PREFIX_LEN])
    }
}

/// The only part of a password hash disclosed to a lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashPrefix(String);

impl HashPrefix {
    /// Parses a prefix, accepting either hex case.
    pub fn parse(s: &str) -> Option<Self> {
        (s.len() == PREFIX_LEN && s.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| Self(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash prefix to store alongside a check record instead of the password.
pub fn hash_prefix(password: &SecretString) -> HashPrefix {
    PasswordHash::of(password).prefix()
}

/// One candidate returned for a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    pub suffix: String,
    pub count: u64,
}

/// Parses a range response body made of `SUFFIX:COUNT` lines.
///
/// Blank lines are skipped and CRLF line endings are accepted. Any other
/// deviation is reported as [`LookupError::Malformed`].
pub fn parse_range_body(body: &str) -> Result<Vec<RangeEntry>, LookupError> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(n, line)| -> Result<RangeEntry, LookupError> {
            let (suffix, count) = line
                .split_once(':')
                .ok_or_else(|| LookupError::Malformed(format!("line {}: missing ':'", n + 1)))?;
            if suffix.len() != SUFFIX_LEN || !suffix.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(LookupError::Malformed(format!("line {}: bad hash suffix", n + 1)));
            }
            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|e| LookupError::Malformed(format!("line {}: bad count: {e}", n + 1)))?;
            Ok(RangeEntry {
                suffix: suffix.to_ascii_uppercase(),
                count,
            })
        })
        .collect()
}

/// Exact-match step: finds the password's own suffix among the candidates.
///
/// Padding rows (count `0`) that happen to match yield a clean verdict.
pub fn match_candidates(hash: &PasswordHash, candidates: &[RangeEntry]) -> BreachVerdict {
    let count = candidates
        .iter()
        .find(|entry| entry.suffix.eq_ignore_ascii_case(hash.suffix()))
        .map(|entry| entry.count)
        .unwrap_or(0);
    BreachVerdict::from_count(count)
}

/// Turns a lookup outcome into a verdict. Lookup failures propagate unchanged.
pub fn classify(
    password: &SecretString,
    lookup: Result<Vec<RangeEntry>, LookupError>,
) -> Result<BreachVerdict, LookupError> {
    let candidates = lookup?;
    Ok(match_candidates(&PasswordHash::of(password), &candidates))
}

impl BreachVerdict {
    /// Folds breach exposure into an assessment: a breached password is
    /// capped to [`BREACHED_SCORE_CAP`] and told so before anything else.
    /// `all_criteria_met` is cleared so the feedback is never shown as excellent;
    /// the per-criterion results are left as evaluated.
    pub fn fold_into(&self, assessment: &mut StrengthAssessment) {
        if !self.is_breached {
            return;
        }
        let capped = PasswordScore::new(i64::from(assessment.score.value()).min(BREACHED_SCORE_CAP));
        assessment.score = capped;
        assessment.label = StrengthLabel::from_score(capped);
        assessment.all_criteria_met = false;
        assessment.feedback.retain(|m| m != ALL_CRITERIA_MET_MESSAGE);
        assessment.feedback.insert(
            0,
            format!(
                "This password appeared in {} known data breaches; do not use it",
                self.breach_count
            ),
        );
    }
}

/// Source of breach range data for a hash prefix.
pub trait BreachLookup {
    fn query(
        &self,
        prefix: &HashPrefix,
    ) -> impl Future<Output = Result<Vec<RangeEntry>, LookupError>> + Send;
}

impl<T: BreachLookup + Sync> BreachLookup for &T {
    fn query(
        &self,
        prefix: &HashPrefix,
    ) -> impl Future<Output = Result<Vec<RangeEntry>, LookupError>> + Send {
        (**self).query(prefix)
    }
}

impl<T: BreachLookup + Send + Sync> BreachLookup for Arc<T> {
    fn query(
        &self,
        prefix: &HashPrefix,
    ) -> impl Future<Output = Result<Vec<RangeEntry>, LookupError>> + Send {
        (**self).query(prefix)
    }
}
