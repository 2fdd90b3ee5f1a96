//! Numeric operations offered behind the authorization gate.
//!
//! All operations are pure. Empty input: `sum` yields 0, `max` and
//! `average` fail with [`NumericError::EmptySequence`].

use std::cmp::Ordering;

use crate::domain::numeric::errors::NumericError;
use crate::domain::numeric::models::SearchOutcome;

/// Non-decreasing permutation of `numbers`.
pub fn sort(mut numbers: Vec<i64>) -> Vec<i64> {
    numbers.sort();
    numbers
}

/// Even numbers of `numbers`, in their original order.
pub fn filter_even(numbers: &[i64]) -> Vec<i64> {
    numbers.iter().copied().filter(|n| n % 2 == 0).collect()
}

pub fn sum(numbers: &[i64]) -> Result<i64, NumericError> {
    numbers
        .iter()
        .try_fold(0i64, |acc, &n| acc.checked_add(n))
        .ok_or(NumericError::Overflow { operation: "sum" })
}

pub fn max(numbers: &[i64]) -> Result<i64, NumericError> {
    numbers
        .iter()
        .copied()
        .max()
        .ok_or(NumericError::EmptySequence { operation: "max" })
}

/// Arithmetic mean. Accumulates in `i128`, so it cannot overflow.
pub fn average(numbers: &[i64]) -> Result<f64, NumericError> {
    if numbers.is_empty() {
        return Err(NumericError::EmptySequence {
            operation: "average",
        });
    }

    let total: i128 = numbers.iter().map(|&n| n as i128).sum();
    Ok(total as f64 / numbers.len() as f64)
}

/// Binary search over `numbers`, which must already be sorted ascending.
///
/// Unsorted input is not detected; the result is then unspecified but
/// never a panic.
pub fn binary_search(numbers: &[i64], target: i64) -> SearchOutcome {
    let mut low = 0usize;
    let mut high = numbers.len();

    while low < high {
        // Midpoint of the closed interval [low, high - 1], rounding down
        let mid = low + (high - 1 - low) / 2;
        match numbers[mid].cmp(&target) {
            Ordering::Equal => return SearchOutcome::found(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    SearchOutcome::not_found()
}
