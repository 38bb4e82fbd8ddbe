//! Password evaluation sections
//!
//! Each section decides a fixed subset of the criteria.

mod blacklist;
mod length;
mod pattern;
mod variety;

pub use blacklist::blacklist_section;
pub use length::length_section;
pub use pattern::pattern_analysis_section;
pub use variety::{SPECIAL_CHARACTERS, character_variety_section};

use crate::types::Criterion;

/// Criteria decided by one section, with their pass/fail outcome.
pub type SectionResult = Vec<(Criterion, bool)>;
