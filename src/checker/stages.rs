//! The four consistency stages
//!
//! Each stage compares every file against the first (reference) entry of its
//! input and returns the first divergence it finds.

use crate::error::CheckFailure;
use crate::properties::{key_name, OrderedProperties};

/// Outcome of a single stage
pub type StageResult = std::result::Result<(), CheckFailure>;

/// Blank means nothing but chars up to U+0020, the same set `key_name` trims
fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c <= ' ')
}

/// Every file's line count must equal the reference file's
///
/// `counts` pairs a file name with its line count, reference first.
pub fn check_line_counts(counts: &[(String, usize)]) -> StageResult {
    let Some((reference_name, reference_count)) = counts.first() else {
        return Ok(());
    };

    for (name, count) in &counts[1..] {
        if count != reference_count {
            return Err(CheckFailure::LineCountMismatch {
                reference: reference_name.clone(),
                other: name.clone(),
            });
        }
    }

    Ok(())
}

/// Every file must declare as many distinct keys as the reference
pub fn check_key_counts(files: &[OrderedProperties]) -> StageResult {
    let Some(reference) = files.first() else {
        return Ok(());
    };

    if files[1..].iter().any(|file| file.len() != reference.len()) {
        return Err(CheckFailure::KeyCountMismatch);
    }

    Ok(())
}

/// Every file must declare the reference keys at the same positions
pub fn check_key_order(files: &[OrderedProperties]) -> StageResult {
    let Some(reference) = files.first() else {
        return Ok(());
    };

    for (position, key) in reference.ordered_keys().iter().enumerate() {
        for file in &files[1..] {
            if file.ordered_keys().get(position) != Some(key) {
                return Err(CheckFailure::KeyOrderMismatch { key: key.clone() });
            }
        }
    }

    Ok(())
}

/// No key, and no non-blank value, may carry surrounding whitespace
pub fn check_whitespace(files: &[OrderedProperties]) -> StageResult {
    for file in files {
        for (key, value) in file.iter() {
            let declared = file.declared_key(key).unwrap_or(key);
            if declared.len() != key.len() {
                return Err(CheckFailure::WhitespaceViolation {
                    key: key.to_string(),
                    value: None,
                });
            }
            if !is_blank(value) && value.len() != key_name(value).len() {
                return Err(CheckFailure::WhitespaceViolation {
                    key: key.to_string(),
                    value: Some(value.to_string()),
                });
            }
        }
    }

    Ok(())
}
