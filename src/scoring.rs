//! Weighted scoring and feedback over a [`CriteriaMap`].
//!
//! Length tiers dominate: one tier outweighs three character classes, so a
//! longer single-class password beats a shorter one using every class. The
//! common/sequential/repeated checks never add points; failing them deducts.

use crate::types::{CriteriaMap, Criterion, PasswordScore, StrengthAssessment, StrengthLabel};

pub const LENGTH_TIER_POINTS: i64 = 24;
pub const CHARACTER_CLASS_POINTS: i64 = 7;
pub const COMMON_PASSWORD_PENALTY: i64 = 30;
pub const SEQUENTIAL_RUN_PENALTY: i64 = 10;
pub const REPEATED_RUN_PENALTY: i64 = 10;

pub const EMPTY_PASSWORD_MESSAGE: &str = "Password is empty";
pub const ALL_CRITERIA_MET_MESSAGE: &str = "Excellent! Very strong password";

/// Failed criteria are reported in this order, highest impact first. Only the
/// lowest failing length tier is reported.
pub const FEEDBACK_ORDER: [Criterion; 10] = [
    Criterion::NotCommonPassword,
    Criterion::MinLength8,
    Criterion::MinLength12,
    Criterion::MinLength16,
    Criterion::NoSequentialRun,
    Criterion::NoRepeatedRun,
    Criterion::HasUppercase,
    Criterion::HasLowercase,
    Criterion::HasDigit,
    Criterion::HasSpecial,
];

/// Points for a criterion: awarded when it passes (bonus) or deducted when
/// it fails (penalty).
enum Weight {
    Bonus(i64),
    Penalty(i64),
}

fn weight(criterion: Criterion) -> Weight {
    match criterion {
        Criterion::MinLength8 | Criterion::MinLength12 | Criterion::MinLength16 => {
            Weight::Bonus(LENGTH_TIER_POINTS)
        }
        Criterion::HasUppercase
        | Criterion::HasLowercase
        | Criterion::HasDigit
        | Criterion::HasSpecial => Weight::Bonus(CHARACTER_CLASS_POINTS),
        Criterion::NotCommonPassword => Weight::Penalty(COMMON_PASSWORD_PENALTY),
        Criterion::NoSequentialRun => Weight::Penalty(SEQUENTIAL_RUN_PENALTY),
        Criterion::NoRepeatedRun => Weight::Penalty(REPEATED_RUN_PENALTY),
    }
}

/// Improvement hint shown when `criterion` fails.
pub fn improvement_message(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::NotCommonPassword => "Avoid common passwords",
        Criterion::MinLength8 => "Use at least 8 characters",
        Criterion::MinLength12 => "Consider using 12+ characters for more security",
        Criterion::MinLength16 => "Use 16+ characters for maximum strength",
        Criterion::NoSequentialRun => "Avoid sequences (123, abc, qwe)",
        Criterion::NoRepeatedRun => "Avoid repeated characters (aaa, 111)",
        Criterion::HasUppercase => "Add uppercase letters",
        Criterion::HasLowercase => "Add lowercase letters",
        Criterion::HasDigit => "Add numbers",
        Criterion::HasSpecial => "Add special characters (!@#$%)",
    }
}

pub fn score(criteria: &CriteriaMap) -> PasswordScore {
    let raw = criteria
        .iter()
        .map(|(criterion, passed)| match (weight(criterion), passed) {
            (Weight::Bonus(points), true) => points,
            (Weight::Penalty(points), false) => -points,
            _ => 0,
        })
        .sum();
    PasswordScore::new(raw)
}

/// Whether a lower length tier already fails, making `criterion` redundant.
fn shadowed_by_lower_tier(criteria: &CriteriaMap, criterion: Criterion) -> bool {
    match criterion {
        Criterion::MinLength12 => !criteria.get(Criterion::MinLength8),
        Criterion::MinLength16 => !criteria.get(Criterion::MinLength12),
        _ => false,
    }
}

pub fn feedback(criteria: &CriteriaMap) -> Vec<String> {
    let messages: Vec<String> = FEEDBACK_ORDER
        .into_iter()
        .filter(|c| !criteria.get(*c) && !shadowed_by_lower_tier(criteria, *c))
        .map(|c| improvement_message(c).to_string())
        .collect();

    if messages.is_empty() {
        vec![ALL_CRITERIA_MET_MESSAGE.to_string()]
    } else {
        messages
    }
}

/// Builds the full assessment for a non-empty password.
pub fn assess(criteria: CriteriaMap) -> StrengthAssessment {
    let score = score(&criteria);
    StrengthAssessment {
        score,
        label: StrengthLabel::from_score(score),
        criteria,
        feedback: feedback(&criteria),
        all_criteria_met: criteria.all_met(),
    }
}

/// Assessment of the empty password: nothing passes.
pub fn empty_assessment() -> StrengthAssessment {
    StrengthAssessment {
        score: PasswordScore::MIN,
        label: StrengthLabel::Weak,
        criteria: CriteriaMap::default(),
        feedback: vec![EMPTY_PASSWORD_MESSAGE.to_string()],
        all_criteria_met: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria_with(passing: &[Criterion]) -> CriteriaMap {
        let mut criteria = CriteriaMap::default();
        for c in passing {
            criteria.set(*c, true);
        }
        criteria
    }

    const CLEAN: [Criterion; 3] = [
        Criterion::NotCommonPassword,
        Criterion::NoSequentialRun,
        Criterion::NoRepeatedRun,
    ];

    #[test]
    fn test_all_criteria_scores_100() {
        let criteria = criteria_with(&Criterion::ALL);
        assert_eq!(score(&criteria).value(), 100);
        let assessment = assess(criteria);
        assert_eq!(assessment.label, StrengthLabel::VeryStrong);
        assert!(assessment.all_criteria_met);
        assert_eq!(assessment.feedback, vec![ALL_CRITERIA_MET_MESSAGE.to_string()]);
    }

    #[test]
    fn test_nothing_passing_clamps_to_zero() {
        assert_eq!(score(&CriteriaMap::default()).value(), 0);
    }

    #[test]
    fn test_length_tier_outweighs_three_classes() {
        assert!(LENGTH_TIER_POINTS > 3 * CHARACTER_CLASS_POINTS);

        // 12 chars, lowercase only vs 8 chars, all four classes
        let mut long_simple = criteria_with(&CLEAN);
        long_simple.set(Criterion::MinLength8, true);
        long_simple.set(Criterion::MinLength12, true);
        long_simple.set(Criterion::HasLowercase, true);

        let mut short_complex = criteria_with(&CLEAN);
        short_complex.set(Criterion::MinLength8, true);
        for c in [Criterion::HasUppercase, Criterion::HasLowercase, Criterion::HasDigit, Criterion::HasSpecial] {
            short_complex.set(c, true);
        }

        assert!(score(&long_simple) > score(&short_complex));
    }

    #[test]
    fn test_common_password_penalty_drops_label() {
        let clean = criteria_with(&Criterion::ALL);
        let mut common = clean;
        common.set(Criterion::NotCommonPassword, false);

        let clean_label = StrengthLabel::from_score(score(&clean));
        let common_label = StrengthLabel::from_score(score(&common));
        assert!(common_label < clean_label);
    }

    #[test]
    fn test_single_run_keeps_perfect_password_very_strong() {
        for run in [Criterion::NoSequentialRun, Criterion::NoRepeatedRun] {
            let mut criteria = criteria_with(&Criterion::ALL);
            criteria.set(run, false);

            assert_eq!(score(&criteria).value(), 90);
            assert_eq!(assess(criteria).label, StrengthLabel::VeryStrong, "{run}");
        }
    }

    #[test]
    fn test_feedback_reports_lowest_failing_length_tier() {
        let mut criteria = criteria_with(&Criterion::ALL);
        for tier in [Criterion::MinLength8, Criterion::MinLength12, Criterion::MinLength16] {
            criteria.set(tier, false);
        }
        assert_eq!(feedback(&criteria), vec!["Use at least 8 characters".to_string()]);

        criteria.set(Criterion::MinLength8, true);
        assert_eq!(
            feedback(&criteria),
            vec!["Consider using 12+ characters for more security".to_string()]
        );

        criteria.set(Criterion::MinLength12, true);
        assert_eq!(
            feedback(&criteria),
            vec!["Use 16+ characters for maximum strength".to_string()]
        );
    }

    #[test]
    fn test_feedback_is_ordered_by_impact() {
        let mut criteria = criteria_with(&Criterion::ALL);
        criteria.set(Criterion::HasSpecial, false);
        criteria.set(Criterion::NotCommonPassword, false);
        criteria.set(Criterion::MinLength16, false);

        assert_eq!(
            feedback(&criteria),
            vec![
                "Avoid common passwords".to_string(),
                "Use 16+ characters for maximum strength".to_string(),
                "Add special characters (!@#$%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_feedback_order_covers_every_criterion() {
        for c in Criterion::ALL {
            assert!(FEEDBACK_ORDER.contains(&c), "{c} missing from feedback order");
        }
    }

    #[test]
    fn test_empty_assessment() {
        let assessment = empty_assessment();
        assert_eq!(assessment.score.value(), 0);
        assert_eq!(assessment.label, StrengthLabel::Weak);
        assert!(assessment.criteria.iter().all(|(_, ok)| !ok));
        assert_eq!(assessment.feedback, vec![EMPTY_PASSWORD_MESSAGE.to_string()]);
    }
}
