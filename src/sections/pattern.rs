//! Pattern analysis section - detects repeated and sequential runs.

use secrecy::{ExposeSecret, SecretString};
use super::SectionResult;
use crate::types::Criterion;

const RUN_LENGTH: usize = 3;

/// Orderings a run may follow, forwards or backwards: alphabet, digits
/// (with the keyboard wrap to `0`), and the three letter rows of a QWERTY
/// keyboard.
const SEQUENCES: [&str; 5] = [
    "abcdefghijklmnopqrstuvwxyz",
    "01234567890",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
];

/// Analyzes password for repeated and sequential runs.
pub fn pattern_analysis_section(password: &SecretString) -> SectionResult {
    let chars: Vec<char> = password.expose_secret().chars().collect();
    vec![
        (Criterion::NoSequentialRun, !has_sequential_run(&chars)),
        (Criterion::NoRepeatedRun, !has_repeated_run(&chars)),
    ]
}

/// Same character three times in a row (e.g., "aaa"). Case-sensitive.
fn has_repeated_run(chars: &[char]) -> bool {
    let mut repeated_count = 1;
    for i in 1..chars.len() {
        if chars[i] == chars[i - 1] {
            repeated_count += 1;
            if repeated_count >= RUN_LENGTH {
                return true;
            }
        } else {
            repeated_count = 1;
        }
    }
    false
}

/// Any 3-character window that appears, ignoring case, in one of
/// [`SEQUENCES`] read forwards or backwards (e.g., "abc", "321", "ewq").
fn has_sequential_run(chars: &[char]) -> bool {
    let lowered: Vec<char> = chars
        .iter()
        .flat_map(|c| c.to_lowercase())
        .collect();

    lowered.windows(RUN_LENGTH).any(|window| {
        let forward: String = window.iter().collect();
        let backward: String = window.iter().rev().collect();
        SEQUENCES
            .iter()
            .any(|seq| seq.contains(&forward) || seq.contains(&backward))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(pwd: &str) -> (bool, bool) {
        let pwd = SecretString::new(pwd.to_string().into());
        let result = pattern_analysis_section(&pwd);
        (result[0].1, result[1].1)
    }

    #[test]
    fn test_pattern_section_repetitive_chars() {
        let (_, no_repeated) = outcome("aaaaBBBB1111");
        assert!(!no_repeated);
    }

    #[test]
    fn test_pattern_section_two_repeats_allowed() {
        assert_eq!(outcome("aabbXX"), (true, true));
    }

    #[test]
    fn test_pattern_section_repeats_are_case_sensitive() {
        let (_, no_repeated) = outcome("aAa");
        assert!(no_repeated);
    }

    #[test]
    fn test_pattern_section_sequential_numbers() {
        let (no_sequential, _) = outcome("pass123word");
        assert!(!no_sequential);
    }

    #[test]
    fn test_pattern_section_descending_numbers() {
        let (no_sequential, _) = outcome("Tr0ub321");
        assert!(!no_sequential);
    }

    #[test]
    fn test_pattern_section_sequential_letters_ignore_case() {
        let (no_sequential, _) = outcome("xAbCx");
        assert!(!no_sequential);
        let (no_sequential, _) = outcome("ZYX9");
        assert!(!no_sequential);
    }

    #[test]
    fn test_pattern_section_keyboard_rows() {
        assert!(!outcome("qwepassword").0);
        assert!(!outcome("Mnbv!").0);
        assert!(!outcome("lkj0").0);
    }

    #[test]
    fn test_pattern_section_strong_password() {
        assert_eq!(outcome("Tr0ub4dor&3!"), (true, true));
    }

    #[test]
    fn test_pattern_section_too_short() {
        assert_eq!(outcome("ab"), (true, true));
        assert_eq!(outcome(""), (true, true));
    }
}
