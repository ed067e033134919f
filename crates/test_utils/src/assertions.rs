//! Custom Test Assertions
//!
//! Assertion helpers with messages that name what went wrong.

use chrono::NaiveDate;
use std::fmt::Debug;

use core_kernel::PortError;

/// Asserts that two floats are within `tolerance` of each other
///
/// # Panics
///
/// Panics if the difference exceeds `tolerance` or either value is NaN
pub fn assert_f64_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a port call failed with `NotFound`
pub fn assert_not_found<T: Debug>(result: Result<T, PortError>) {
    match result {
        Err(PortError::NotFound { .. }) => {}
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

/// Asserts that a port call failed with `Conflict`
pub fn assert_conflict<T: Debug>(result: Result<T, PortError>) {
    match result {
        Err(PortError::Conflict { .. }) => {}
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

/// Asserts that dates never increase from one item to the next
pub fn assert_newest_first(dates: &[NaiveDate]) {
    for pair in dates.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "Expected newest first, but {} comes before {}",
            pair[0],
            pair[1]
        );
    }
}
