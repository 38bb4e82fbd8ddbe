//! Blacklist section - checks if password is in the common password list.

use crate::blacklist::is_blacklisted;
use crate::types::Criterion;
use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;

/// Passes when the password is not a known common password.
pub fn blacklist_section(password: &SecretString) -> SectionResult {
    vec![(
        Criterion::NotCommonPassword,
        !is_blacklisted(password.expose_secret()),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_section_common_password() {
        let pwd = SecretString::new("Password".to_string().into());
        assert_eq!(blacklist_section(&pwd), vec![(Criterion::NotCommonPassword, false)]);
    }

    #[test]
    fn test_blacklist_section_strong_password() {
        let pwd = SecretString::new("CorrectHorseBatteryStaple!123".to_string().into());
        assert_eq!(blacklist_section(&pwd), vec![(Criterion::NotCommonPassword, true)]);
    }
}
