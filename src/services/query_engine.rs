//! Series and summary computations over measurement rows.
//!
//! Everything here is synchronous and side-effect free. Rows are not grouped
//! by station: when several stations report the same date, each report is a
//! separate entry in a series and a separate sample in the statistics.

use chrono::NaiveDate;

use crate::db::{
    DateRange, Measurement, PrecipitationObservation, TemperatureObservation, TemperatureStats,
};
use crate::services::QueryError;

/// Which observed quantity a series reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationField {
    Precipitation,
    Temperature,
}

impl ObservationField {
    pub fn value(self, measurement: &Measurement) -> Option<f64> {
        match self {
            ObservationField::Precipitation => measurement.prcp,
            ObservationField::Temperature => Some(measurement.tobs),
        }
    }
}

/// `(date, value)` pairs for `field`, ascending by date, duplicates kept.
///
/// Rows without a value for `field` are skipped.
pub fn series(measurements: &[Measurement], field: ObservationField) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = measurements
        .iter()
        .filter_map(|m| field.value(m).map(|v| (m.date, v)))
        .collect();

    // Stable, so same-day rows keep their input order
    points.sort_by_key(|(date, _)| *date);
    points
}

pub fn precipitation_series(measurements: &[Measurement]) -> Vec<PrecipitationObservation> {
    series(measurements, ObservationField::Precipitation)
        .into_iter()
        .map(|(date, prcp)| PrecipitationObservation { date, prcp })
        .collect()
}

pub fn temperature_series(measurements: &[Measurement]) -> Vec<TemperatureObservation> {
    series(measurements, ObservationField::Temperature)
        .into_iter()
        .map(|(date, tobs)| TemperatureObservation { date, tobs })
        .collect()
}

/// Minimum, maximum and mean temperature of the rows inside `range`.
///
/// Fails with [`QueryError::NoDataInRange`] rather than inventing values when
/// nothing matches.
pub fn temperature_stats(
    measurements: &[Measurement],
    range: DateRange,
) -> Result<TemperatureStats, QueryError> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;

    for tobs in measurements
        .iter()
        .filter(|m| range.contains(m.date))
        .map(|m| m.tobs)
    {
        count += 1;
        sum += tobs;
        minimum = minimum.min(tobs);
        maximum = maximum.max(tobs);
    }

    if count == 0 {
        return Err(QueryError::NoDataInRange(range));
    }

    // Rounding can push the mean of near-equal samples just outside [min, max]
    let average = (sum / count as f64).clamp(minimum, maximum);

    Ok(TemperatureStats {
        minimum,
        maximum,
        average,
    })
}
