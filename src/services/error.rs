use crate::db::{DateRange, DbError};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("End date {end} is before start date {start}")]
    InvalidDateOrder {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("No temperature observations for {0}")]
    NoDataInRange(DateRange),
    #[error("Dataset contains no measurements")]
    EmptyDataset,
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] DbError),
}

impl QueryError {
    /// Caller supplied input the service cannot interpret
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidDateFormat(_) | QueryError::InvalidDateOrder { .. }
        )
    }
}
