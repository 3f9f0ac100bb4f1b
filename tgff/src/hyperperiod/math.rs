/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! GCD and checked LCM over graph periods.

use super::HyperperiodError;

/// Euclidean GCD.  `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// LCM of two non-zero periods, `Err(Overflow)` past `u64::MAX`.
///
/// Dividing by the GCD before multiplying keeps intermediate values small;
/// the multiplication itself is still checked.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    debug_assert!(a != 0 && b != 0, "zero periods are filtered out by the caller");

    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// LCM of every period, or `None` when there are none.
pub fn lcm_all<I>(periods: I) -> Result<Option<u64>, HyperperiodError>
where
    I: IntoIterator<Item = u64>,
{
    periods.into_iter().try_fold(None, |acc, p| match acc {
        None => Ok(Some(p)),
        Some(acc) => lcm(acc, p).map(Some),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
