use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Dataset records
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One station's observation for one calendar date.
///
/// `station` is not required to reference a known [`Station`].
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    pub station: String,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// Inclusive date bounds; `to: None` is open-ended above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn bounded(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to: Some(to) }
    }

    pub fn starting_at(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && self.to.map_or(true, |to| date <= to)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to {
            Some(to) => write!(f, "{} to {}", self.from, to),
            None => write!(f, "{} onwards", self.from),
        }
    }
}

// API response DTOs (to avoid circular dependency between services and api modules)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrecipitationObservation {
    pub date: NaiveDate,
    pub prcp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub tobs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TemperatureStats {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
}
