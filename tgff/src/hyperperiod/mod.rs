/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod derived from the graph periods of a [`Document`].
//!
//! The hyperperiod is the LCM of all graph periods.  Graphs without a
//! `PERIOD` statement (period 0) are ignored.

pub mod math;

use thiserror::Error;
use tracing::debug;

use crate::document::Document;
use math::lcm_all;

/// Errors from [`derive`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HyperperiodError {
    #[error("no graph with a valid (non-zero) period")]
    NoValidPeriods,

    /// Holds the two operands whose LCM overflowed.
    #[error("LCM overflow computing lcm({a}, {b})")]
    Overflow { a: u64, b: u64 },
}

/// Distinct non-zero graph periods, ascending.
pub fn unique_periods(document: &Document) -> Vec<u64> {
    let mut periods: Vec<u64> = document
        .graphs
        .iter()
        .map(|g| g.period)
        .filter(|&p| p != 0)
        .collect();
    periods.sort_unstable();
    periods.dedup();
    periods
}

/// LCM of every non-zero graph period in `document`.
pub fn derive(document: &Document) -> Result<u64, HyperperiodError> {
    let periods = unique_periods(document);
    let hyperperiod = lcm_all(periods.iter().copied())?.ok_or(HyperperiodError::NoValidPeriods)?;

    debug!(?periods, hyperperiod, "hyperperiod derived");
    Ok(hyperperiod)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
