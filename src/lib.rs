//! Password hygiene checks
//!
//! This library scores password strength against a fixed set of criteria
//! and classifies breach exposure through a k-anonymity range lookup: only
//! the first five hex characters of the password's SHA-1 hash ever leave the
//! process.
//!
//! # Features
//!
//! - `async` (default): Enables the breach-checking orchestration, the
//!   prefix cache and cancellable evaluation
//! - `hibp` (default): Enables the Pwned Passwords range client
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_BLACKLIST_PATH`: Extra common-password file extending the bundled list
//! - `PWD_HIBP_URL`, `PWD_HIBP_USER_AGENT`, `PWD_HIBP_TIMEOUT_MS`,
//!   `PWD_HIBP_PADDING`, `PWD_CACHE_TTL_SECS`, `PWD_CACHE_CAPACITY`:
//!   see [`BreachConfig::from_env`]
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_hygiene::{evaluate_password_strength, init_blacklist};
//! use secrecy::SecretString;
//!
//! // Optional: extend the bundled common-password list (call once at startup)
//! init_blacklist().expect("Failed to load blacklist");
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let assessment = evaluate_password_strength(&password);
//!
//! println!("Score: {}", assessment.score);
//! println!("Strength: {}", assessment.strength());
//! ```
//!
//! With the default features, a full check including breach status:
//!
//! ```rust,no_run
//! # #[cfg(feature = "hibp")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use pwd_hygiene::{BreachConfig, CachedLookup, HibpClient, PasswordChecker};
//! use secrecy::SecretString;
//!
//! let config = BreachConfig::from_env()?;
//! let lookup = CachedLookup::from_config(HibpClient::new(&config)?, &config);
//! let checker = PasswordChecker::from_config(lookup, &config);
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = checker.check(&password).await;
//! println!("{:?}", result.breach.is_breached());
//! # Ok(())
//! # }
//! ```

// Internal modules
mod blacklist;
mod breach;
#[cfg(feature = "async")]
mod check;
mod config;
mod error;
mod evaluator;
mod scoring;
mod sections;
mod types;

// Public API
pub use blacklist::{
    BLACKLIST_PATH_ENV, BlacklistError, get_blacklist, get_blacklist_path, init_blacklist,
    init_blacklist_from_path, is_blacklisted,
};
pub use breach::{
    BREACHED_SCORE_CAP, BreachLookup, HashPrefix, PREFIX_LEN, PasswordHash, RangeEntry,
    SUFFIX_LEN, classify, hash_prefix, match_candidates, parse_range_body,
};
pub use config::BreachConfig;
pub use error::{ConfigError, LookupError};
pub use evaluator::evaluate_password_strength;
pub use scoring::{ALL_CRITERIA_MET_MESSAGE, EMPTY_PASSWORD_MESSAGE, improvement_message};
pub use sections::SPECIAL_CHARACTERS;
pub use types::{
    BreachStatus, BreachVerdict, CheckResult, CriteriaMap, Criterion, PasswordScore,
    StrengthAssessment, StrengthLabel,
};

#[cfg(feature = "async")]
pub use breach::CachedLookup;
#[cfg(feature = "async")]
pub use check::PasswordChecker;
#[cfg(feature = "async")]
pub use evaluator::{evaluate_password_strength_cancellable, evaluate_password_strength_tx};

#[cfg(feature = "hibp")]
pub use breach::HibpClient;
