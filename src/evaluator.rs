//! Password strength evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::scoring::{assess, empty_assessment};
use crate::sections::{
    SectionResult, blacklist_section, character_variety_section, length_section,
    pattern_analysis_section,
};
use crate::types::{CriteriaMap, StrengthAssessment};

type Section = fn(&SecretString) -> SectionResult;

/// Executed in sequence; together they decide every criterion.
const SECTIONS: [(&str, Section); 4] = [
    ("blacklist", blacklist_section),
    ("length", length_section),
    ("variety", character_variety_section),
    ("pattern", pattern_analysis_section),
];

fn apply(criteria: &mut CriteriaMap, result: SectionResult) {
    for (criterion, passed) in result {
        criteria.set(criterion, passed);
    }
}

/// Evaluates password strength and returns a detailed assessment.
///
/// Total and deterministic: any string, including the empty one, yields a
/// valid assessment, and equal inputs yield equal outputs.
pub fn evaluate_password_strength(password: &SecretString) -> StrengthAssessment {
    if password.expose_secret().is_empty() {
        return empty_assessment();
    }

    let mut criteria = CriteriaMap::default();
    for (_, section_fn) in SECTIONS {
        apply(&mut criteria, section_fn(password));
    }
    assess(criteria)
}

/// Like [`evaluate_password_strength`], checking `token` before each section.
///
/// Returns `None` when the evaluation was cancelled.
#[cfg(feature = "async")]
pub fn evaluate_password_strength_cancellable(
    password: &SecretString,
    token: &CancellationToken,
) -> Option<StrengthAssessment> {
    if password.expose_secret().is_empty() {
        return Some(empty_assessment());
    }

    let mut criteria = CriteriaMap::default();
    for (section_name, section_fn) in SECTIONS {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(section = section_name, "evaluation cancelled");
            #[cfg(not(feature = "tracing"))]
            let _ = section_name;
            return None;
        }
        apply(&mut criteria, section_fn(password));
    }
    Some(assess(criteria))
}

/// Async version that sends the assessment via channel unless cancelled.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthAssessment>,
) {
    #[cfg(feature = "tracing")]
    tracing::trace!("evaluation is about to start");

    let Some(assessment) = evaluate_password_strength_cancellable(password, &token) else {
        return;
    };

    if let Err(_e) = tx.send(assessment).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password assessment: {}", _e);
    }
}
