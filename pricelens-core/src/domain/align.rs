//! Instrument/benchmark time alignment.
//!
//! Relative performance is only meaningful over dates both series traded.
//! Unlike a union alignment, no void bars are introduced: both outputs are
//! restricted to the intersection of the two date axes.

use super::series::PriceSeries;
use crate::error::AnalysisError;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Instrument and benchmark restricted to their common dates.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub instrument: PriceSeries,
    pub benchmark: PriceSeries,
}

/// Intersect the date axes of `instrument` and `benchmark`.
///
/// Fails with `MisalignedSeries` when fewer than two dates are shared, since
/// a return needs a start and an end point.
pub fn align_common(
    instrument: &PriceSeries,
    benchmark: &PriceSeries,
) -> Result<AlignedPair, AnalysisError> {
    let bench_dates: BTreeSet<NaiveDate> = benchmark.bars().iter().map(|b| b.date).collect();
    let dates: Vec<NaiveDate> = instrument
        .bars()
        .iter()
        .map(|b| b.date)
        .filter(|d| bench_dates.contains(d))
        .collect();

    let misaligned = || AnalysisError::MisalignedSeries {
        instrument: instrument.symbol().to_string(),
        benchmark: benchmark.symbol().to_string(),
        common: dates.len(),
    };

    if dates.len() < 2 {
        return Err(misaligned());
    }

    let inst = instrument.restrict_to(&dates).ok_or_else(misaligned)?;
    let bench = benchmark.restrict_to(&dates).ok_or_else(misaligned)?;

    Ok(AlignedPair {
        dates,
        instrument: inst,
        benchmark: bench,
    })
}
