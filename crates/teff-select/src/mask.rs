//! Boolean mask algebra.

use teff_core::{Error, Result};

fn check_lengths(masks: &[&[bool]]) -> Result<usize> {
    let Some(first) = masks.first() else {
        return Err(Error::Validation("mask reduction requires at least one mask".into()));
    };
    let n = first.len();
    for (i, m) in masks.iter().enumerate() {
        if m.len() != n {
            return Err(Error::Validation(format!(
                "mask length mismatch: mask 0 has {n} entries, mask {i} has {}",
                m.len()
            )));
        }
    }
    Ok(n)
}

/// Elementwise AND over one or more equal-length masks.
pub fn reduce_and(masks: &[&[bool]]) -> Result<Vec<bool>> {
    let n = check_lengths(masks)?;
    Ok((0..n).map(|i| masks.iter().all(|m| m[i])).collect())
}

/// Elementwise OR over one or more equal-length masks.
pub fn reduce_or(masks: &[&[bool]]) -> Result<Vec<bool>> {
    let n = check_lengths(masks)?;
    Ok((0..n).map(|i| masks.iter().any(|m| m[i])).collect())
}

/// Number of set entries.
pub fn count_true(mask: &[bool]) -> u64 {
    mask.iter().filter(|&&b| b).count() as u64
}
