//! Character variety section - checks for uppercase, lowercase, digits, special chars.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::types::Criterion;

/// Every character that counts towards `has_special`: the 32 ASCII punctuation
/// characters. Space and non-ASCII symbols are not included.
pub const SPECIAL_CHARACTERS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}

/// Checks which character classes the password contains.
pub fn character_variety_section(password: &SecretString) -> SectionResult {
    let pwd = password.expose_secret();
    vec![
        (Criterion::HasUppercase, pwd.chars().any(|c| c.is_uppercase())),
        (Criterion::HasLowercase, pwd.chars().any(|c| c.is_lowercase())),
        (Criterion::HasDigit, pwd.chars().any(|c| c.is_ascii_digit())),
        (Criterion::HasSpecial, pwd.chars().any(is_special)),
    ]
}
