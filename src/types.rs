//! Assessment and verdict types shared by the evaluator and the breach classifier.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::breach::HashPrefix;
use crate::error::LookupError;

/// Password score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordScore(u8);

impl PasswordScore {
    pub const MIN: PasswordScore = PasswordScore(0);
    pub const MAX: PasswordScore = PasswordScore(100);

    /// Builds a score from a raw weighted sum, clamping it into `0..=100`.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PasswordScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorical strength, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    /// Lower bound (inclusive) of every label above `Weak`.
    pub const BREAKPOINTS: [(u8, StrengthLabel); 4] = [
        (35, StrengthLabel::Fair),
        (55, StrengthLabel::Good),
        (70, StrengthLabel::Strong),
        (85, StrengthLabel::VeryStrong),
    ];

    pub fn from_score(score: PasswordScore) -> Self {
        Self::BREAKPOINTS
            .into_iter()
            .rev()
            .find(|(min, _)| score.value() >= *min)
            .map(|(_, label)| label)
            .unwrap_or(StrengthLabel::Weak)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "weak",
            StrengthLabel::Fair => "fair",
            StrengthLabel::Good => "good",
            StrengthLabel::Strong => "strong",
            StrengthLabel::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of checks every assessment reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    #[serde(rename = "min_length_8")]
    MinLength8,
    #[serde(rename = "min_length_12")]
    MinLength12,
    #[serde(rename = "min_length_16")]
    MinLength16,
    HasUppercase,
    HasLowercase,
    HasDigit,
    HasSpecial,
    NotCommonPassword,
    NoSequentialRun,
    NoRepeatedRun,
}

impl Criterion {
    /// Every criterion, in wire key order.
    pub const ALL: [Criterion; 10] = [
        Criterion::MinLength8,
        Criterion::MinLength12,
        Criterion::MinLength16,
        Criterion::HasUppercase,
        Criterion::HasLowercase,
        Criterion::HasDigit,
        Criterion::HasSpecial,
        Criterion::NotCommonPassword,
        Criterion::NoSequentialRun,
        Criterion::NoRepeatedRun,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Criterion::MinLength8 => "min_length_8",
            Criterion::MinLength12 => "min_length_12",
            Criterion::MinLength16 => "min_length_16",
            Criterion::HasUppercase => "has_uppercase",
            Criterion::HasLowercase => "has_lowercase",
            Criterion::HasDigit => "has_digit",
            Criterion::HasSpecial => "has_special",
            Criterion::NotCommonPassword => "not_common_password",
            Criterion::NoSequentialRun => "no_sequential_run",
            Criterion::NoRepeatedRun => "no_repeated_run",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Pass/fail for each [`Criterion`]. Starts with every criterion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CriteriaMap {
    passed: [bool; 10],
}

impl CriteriaMap {
    pub fn get(&self, criterion: Criterion) -> bool {
        self.passed[criterion.index()]
    }

    pub fn set(&mut self, criterion: Criterion, passed: bool) {
        self.passed[criterion.index()] = passed;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, bool)> + '_ {
        Criterion::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn failed(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.iter().filter(|(_, ok)| !ok).map(|(c, _)| c)
    }

    pub fn all_met(&self) -> bool {
        self.passed.iter().all(|ok| *ok)
    }
}

impl Serialize for CriteriaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Criterion::ALL.len()))?;
        for (criterion, passed) in self.iter() {
            map.serialize_entry(criterion.key(), &passed)?;
        }
        map.end()
    }
}

/// Result of [`evaluate_password_strength`](crate::evaluate_password_strength).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthAssessment {
    pub score: PasswordScore,
    #[serde(rename = "strength")]
    pub label: StrengthLabel,
    pub criteria: CriteriaMap,
    /// Never empty.
    pub feedback: Vec<String>,
    pub all_criteria_met: bool,
}

impl StrengthAssessment {
    pub fn strength(&self) -> StrengthLabel {
        self.label
    }
}

/// Outcome of matching a password against a breach range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BreachVerdict {
    pub is_breached: bool,
    pub breach_count: u64,
}

impl BreachVerdict {
    pub fn from_count(breach_count: u64) -> Self {
        Self {
            is_breached: breach_count > 0,
            breach_count,
        }
    }
}

/// Breach side of a [`CheckResult`]. `Unavailable` never means "not breached".
#[derive(Debug, Clone, PartialEq)]
pub enum BreachStatus {
    Checked(BreachVerdict),
    Unavailable(LookupError),
}

impl BreachStatus {
    pub fn verdict(&self) -> Option<BreachVerdict> {
        match self {
            BreachStatus::Checked(verdict) => Some(*verdict),
            BreachStatus::Unavailable(_) => None,
        }
    }

    pub fn is_breached(&self) -> Option<bool> {
        self.verdict().map(|v| v.is_breached)
    }
}

impl From<Result<BreachVerdict, LookupError>> for BreachStatus {
    fn from(result: Result<BreachVerdict, LookupError>) -> Self {
        match result {
            Ok(verdict) => BreachStatus::Checked(verdict),
            Err(err) => BreachStatus::Unavailable(err),
        }
    }
}

/// Strength assessment merged with the breach status of the same password.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub assessment: StrengthAssessment,
    pub breach: BreachStatus,
    /// First characters of the SHA-1 hash, safe to store with a history record.
    pub hash_prefix: HashPrefix,
}

#[derive(Serialize)]
struct CheckResultWire<'a> {
    #[serde(flatten)]
    assessment: &'a StrengthAssessment,
    is_breached: Option<bool>,
    breach_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breach_error: Option<String>,
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let verdict = self.breach.verdict();
        let breach_error = match &self.breach {
            BreachStatus::Checked(_) => None,
            BreachStatus::Unavailable(err) => Some(err.to_string()),
        };
        CheckResultWire {
            assessment: &self.assessment,
            is_breached: verdict.map(|v| v.is_breached),
            breach_count: verdict.map(|v| v.breach_count),
            breach_error,
        }
        .serialize(serializer)
    }
}
