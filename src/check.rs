//! Runs strength evaluation and breach lookup side by side and merges them.

use std::time::Duration;

use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

use crate::breach::{BreachLookup, HashPrefix, PasswordHash, RangeEntry, match_candidates};
use crate::config::BreachConfig;
use crate::error::LookupError;
use crate::evaluator::evaluate_password_strength;
use crate::types::{BreachStatus, CheckResult};

pub struct PasswordChecker<L> {
    lookup: L,
    timeout: Duration,
}

impl<L: BreachLookup> PasswordChecker<L> {
    pub fn new(lookup: L, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    pub fn from_config(lookup: L, config: &BreachConfig) -> Self {
        Self::new(lookup, config.timeout)
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Full check of one password.
    ///
    /// The breach lookup only ever sees the hash prefix and is bounded by the
    /// configured timeout. When it fails the assessment is still returned and
    /// the breach side reports [`BreachStatus::Unavailable`].
    pub async fn check(&self, password: &SecretString) -> CheckResult {
        self.run(password, None).await
    }

    /// [`check`](Self::check) whose breach lookup is abandoned once `token` is
    /// cancelled, reporting [`LookupError::Cancelled`]. The assessment is
    /// always delivered.
    pub async fn check_with_cancel(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> CheckResult {
        self.run(password, Some(token)).await
    }

    async fn run(&self, password: &SecretString, token: Option<&CancellationToken>) -> CheckResult {
        let hash = PasswordHash::of(password);
        let prefix = hash.prefix();

        let (mut assessment, lookup) = tokio::join!(
            async { evaluate_password_strength(password) },
            self.bounded_query(&prefix, token),
        );

        let breach = lookup.map(|candidates| match_candidates(&hash, &candidates));
        match &breach {
            Ok(verdict) => verdict.fold_into(&mut assessment),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(prefix = %prefix, error = %_err, "breach status unknown");
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            prefix = %prefix,
            score = assessment.score.value(),
            strength = %assessment.label,
            "password checked"
        );

        CheckResult {
            assessment,
            breach: BreachStatus::from(breach),
            hash_prefix: prefix,
        }
    }

    async fn bounded_query(
        &self,
        prefix: &HashPrefix,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<RangeEntry>, LookupError> {
        let query = async {
            tokio::time::timeout(self.timeout, self.lookup.query(prefix))
                .await
                .unwrap_or(Err(LookupError::Timeout(self.timeout)))
        };
        match token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(LookupError::Cancelled),
                result = query => result,
            },
            None => query.await,
        }
    }
}
