use chrono::{Days, NaiveDate};
use tracing::{debug, instrument, warn};

use crate::db::{DateRange, MeasurementRepository};
use crate::services::QueryError;

pub const DEFAULT_TRAILING_DAYS: u32 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns caller input into concrete query bounds.
#[derive(Clone)]
pub struct WindowResolver {
    measurement_repo: MeasurementRepository,
    trailing_days: u32,
}

impl WindowResolver {
    pub fn new(measurement_repo: MeasurementRepository, trailing_days: u32) -> Self {
        Self {
            measurement_repo,
            trailing_days: trailing_days.max(1),
        }
    }

    pub fn trailing_days(&self) -> u32 {
        self.trailing_days
    }

    /// The trailing window ending at the dataset's latest date
    #[instrument(skip(self), fields(trailing_days = self.trailing_days))]
    pub async fn resolve_default_window(&self) -> Result<DateRange, QueryError> {
        let latest = self
            .measurement_repo
            .find_latest_date()
            .await?
            .ok_or(QueryError::EmptyDataset)?;

        let window = trailing_window(latest, self.trailing_days);
        debug!("Resolved default window {}", window);
        Ok(window)
    }
}

/// `days` calendar days ending at `latest`, both ends inclusive.
///
/// With 365 days and a latest date of 2017-08-23 the window starts 2016-08-24.
pub fn trailing_window(latest: NaiveDate, days: u32) -> DateRange {
    let back = Days::new(u64::from(days.max(1) - 1));
    let from = latest.checked_sub_days(back).unwrap_or(NaiveDate::MIN);
    DateRange::bounded(from, latest)
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Rejects anything chrono would otherwise tolerate, such as single-digit
/// months or signed years.
pub fn parse_date(value: &str) -> Result<NaiveDate, QueryError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        warn!("Rejected malformed date '{}'", value);
        return Err(QueryError::InvalidDateFormat(value.to_string()));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        warn!("Rejected impossible date '{}': {}", value, e);
        QueryError::InvalidDateFormat(value.to_string())
    })
}

/// Explicit `start[/end]` bounds; no storage access.
pub fn resolve_explicit_range(start: &str, end: Option<&str>) -> Result<DateRange, QueryError> {
    let start = parse_date(start)?;

    match end.map(parse_date).transpose()? {
        Some(end) if end < start => Err(QueryError::InvalidDateOrder { start, end }),
        Some(end) => Ok(DateRange::bounded(start, end)),
        None => Ok(DateRange::starting_at(start)),
    }
}
