use tracing::{debug, info, instrument};

use crate::db::{
    DateRange, MeasurementRepository, PrecipitationObservation, Station, StationRepository,
    TemperatureObservation, TemperatureStats,
};
use crate::services::query_engine;
use crate::services::window_resolver::resolve_explicit_range;
use crate::services::{QueryError, WindowResolver};

#[derive(Clone)]
pub struct ObservationService {
    station_repo: StationRepository,
    measurement_repo: MeasurementRepository,
    window_resolver: WindowResolver,
}

impl ObservationService {
    pub fn new(
        station_repo: StationRepository,
        measurement_repo: MeasurementRepository,
        window_resolver: WindowResolver,
    ) -> Self {
        Self {
            station_repo,
            measurement_repo,
            window_resolver,
        }
    }

    pub async fn all_stations(&self) -> Result<Vec<Station>, QueryError> {
        Ok(self.station_repo.find_all().await?)
    }

    /// Precipitation over the trailing window ending at the latest observation
    pub async fn prior_year_precipitation(
        &self,
    ) -> Result<Vec<PrecipitationObservation>, QueryError> {
        let window = self.window_resolver.resolve_default_window().await?;
        self.precipitation_series(window).await
    }

    /// Temperatures over the trailing window ending at the latest observation
    pub async fn prior_year_temperatures(&self) -> Result<Vec<TemperatureObservation>, QueryError> {
        let window = self.window_resolver.resolve_default_window().await?;
        self.temperature_series(window).await
    }

    #[instrument(skip(self), fields(range = %range))]
    pub async fn precipitation_series(
        &self,
        range: DateRange,
    ) -> Result<Vec<PrecipitationObservation>, QueryError> {
        let measurements = self
            .measurement_repo
            .find_in_range(Some(range.from), range.to)
            .await?;

        let series = query_engine::precipitation_series(&measurements);
        debug!(
            "{} of {} measurements carry precipitation",
            series.len(),
            measurements.len()
        );
        Ok(series)
    }

    #[instrument(skip(self), fields(range = %range))]
    pub async fn temperature_series(
        &self,
        range: DateRange,
    ) -> Result<Vec<TemperatureObservation>, QueryError> {
        let measurements = self
            .measurement_repo
            .find_in_range(Some(range.from), range.to)
            .await?;

        Ok(query_engine::temperature_series(&measurements))
    }

    /// Min/avg/max temperature from `start` through `end` (or the end of the data).
    ///
    /// Both dates are validated before the dataset is touched.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, QueryError> {
        let range = resolve_explicit_range(start, end)?;
        self.temperature_stats_in(range).await
    }

    #[instrument(skip(self), fields(range = %range))]
    pub async fn temperature_stats_in(&self, range: DateRange) -> Result<TemperatureStats, QueryError> {
        let measurements = self
            .measurement_repo
            .find_in_range(Some(range.from), range.to)
            .await?;

        let stats = query_engine::temperature_stats(&measurements, range)?;
        info!(
            "Temperature over {} measurements: min {:.1}, avg {:.1}, max {:.1}",
            measurements.len(),
            stats.minimum,
            stats.average,
            stats.maximum
        );
        Ok(stats)
    }

    pub fn window_resolver(&self) -> &WindowResolver {
        &self.window_resolver
    }
}
