#![cfg(feature = "async")]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use pwd_hygiene::{
    BreachLookup, BreachStatus, CachedLookup, Criterion, HashPrefix, LookupError, PasswordChecker,
    PasswordHash, RangeEntry, StrengthLabel, evaluate_password_strength,
};
use secrecy::SecretString;
use serde_json::json;

/// In-memory corpus answering range queries like the real service would.
struct MemoryCorpus {
    ranges: HashMap<HashPrefix, Vec<RangeEntry>>,
}

impl MemoryCorpus {
    fn with_breached(passwords: &[(&str, u64)]) -> Self {
        let mut ranges: HashMap<HashPrefix, Vec<RangeEntry>> = HashMap::new();
        for (pwd, count) in passwords {
            let hash = PasswordHash::of(&secret(pwd));
            ranges.entry(hash.prefix()).or_default().push(RangeEntry {
                suffix: hash.suffix().to_string(),
                count: *count,
            });
        }
        Self { ranges }
    }
}

impl BreachLookup for MemoryCorpus {
    async fn query(&self, prefix: &HashPrefix) -> Result<Vec<RangeEntry>, LookupError> {
        Ok(self.ranges.get(prefix).cloned().unwrap_or_default())
    }
}

struct OfflineLookup;

impl BreachLookup for OfflineLookup {
    async fn query(&self, _prefix: &HashPrefix) -> Result<Vec<RangeEntry>, LookupError> {
        Err(LookupError::Unavailable("connection refused".into()))
    }
}

fn secret(pwd: &str) -> SecretString {
    SecretString::new(pwd.to_string().into())
}

#[tokio::test]
async fn breached_password_is_reported_with_count() {
    let corpus = MemoryCorpus::with_breached(&[("password", 3_861_493), ("letmein", 10)]);
    let checker = PasswordChecker::new(corpus, Duration::from_secs(1));

    let result = checker.check(&secret("password")).await;

    assert_eq!(result.breach.is_breached(), Some(true));
    assert_eq!(result.breach.verdict().unwrap().breach_count, 3_861_493);
    assert_eq!(result.assessment.label, StrengthLabel::Weak);
}

#[tokio::test]
async fn strong_unbreached_password_serializes_to_ui_shape() {
    let corpus = MemoryCorpus::with_breached(&[("password", 5)]);
    let checker = PasswordChecker::new(corpus, Duration::from_secs(1));

    let result = checker.check(&secret("Xk9#mQ2$vL7@pR4!wZ6&")).await;
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["score"], 100);
    assert_eq!(value["strength"], "very_strong");
    assert_eq!(value["is_breached"], false);
    assert_eq!(value["breach_count"], 0);
    assert_eq!(value["all_criteria_met"], true);
    assert_eq!(value["feedback"].as_array().unwrap().len(), 1);
    assert_eq!(value["criteria"].as_object().unwrap().len(), Criterion::ALL.len());
    assert!(value.get("breach_error").is_none());
    assert!(value.get("hash_prefix").is_none());
}

#[tokio::test]
async fn breached_strong_password_is_not_flagged_excellent() {
    let corpus = MemoryCorpus::with_breached(&[("Xk9#mQ2$vL7@pR4!wZ6&", 2)]);
    let checker = PasswordChecker::new(corpus, Duration::from_secs(1));

    let result = checker.check(&secret("Xk9#mQ2$vL7@pR4!wZ6&")).await;
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["is_breached"], true);
    assert_eq!(value["all_criteria_met"], false);
    assert!(value["criteria"].as_object().unwrap().values().all(|ok| ok == true));
    assert!(value["feedback"][0].as_str().unwrap().contains("2 known data breaches"));
}

#[tokio::test]
async fn offline_lookup_never_reports_clean() {
    let checker = PasswordChecker::new(OfflineLookup, Duration::from_secs(1));

    let result = checker.check(&secret("Xk9#mQ2$vL7@pR4!wZ6&")).await;

    assert!(matches!(result.breach, BreachStatus::Unavailable(_)));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["is_breached"], json!(null));
    assert_eq!(value["breach_count"], json!(null));
    assert_eq!(
        value["breach_error"],
        "Breach lookup unavailable: connection refused"
    );
    // strength side still delivered
    assert_eq!(value["strength"], "very_strong");
}

#[tokio::test]
async fn cached_lookup_can_be_shared_between_checkers() {
    let corpus = MemoryCorpus::with_breached(&[("hunter2", 17)]);
    let cache = Arc::new(CachedLookup::new(corpus, Duration::from_secs(60), 32));

    let first = PasswordChecker::new(cache.clone(), Duration::from_secs(1));
    let second = PasswordChecker::new(cache.clone(), Duration::from_secs(1));

    assert_eq!(first.check(&secret("hunter2")).await.breach.is_breached(), Some(true));
    assert_eq!(second.check(&secret("hunter2")).await.breach.is_breached(), Some(true));
    assert_eq!(cache.len(), 1);
}

#[test]
fn evaluation_properties() {
    let empty = evaluate_password_strength(&secret(""));
    assert_eq!(empty.score.value(), 0);
    assert_eq!(empty.label, StrengthLabel::Weak);
    assert!(empty.criteria.iter().all(|(_, ok)| !ok));

    let repeated = evaluate_password_strength(&secret("aaaaaaaa"));
    assert!(repeated.criteria.get(Criterion::MinLength8));
    assert!(!repeated.criteria.get(Criterion::NoRepeatedRun));

    let sequential = evaluate_password_strength(&secret("abcdefgh"));
    assert!(!sequential.criteria.get(Criterion::NoSequentialRun));

    let strong = evaluate_password_strength(&secret("Xk9#mQ2$vL7@pR4!wZ6&"));
    assert_eq!(strong.label, StrengthLabel::VeryStrong);
    assert!(strong.criteria.iter().all(|(_, ok)| ok));
}
