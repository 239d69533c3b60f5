pub mod error;
pub mod observation_service;
pub mod query_engine;
pub mod window_resolver;

pub use error::QueryError;
pub use observation_service::ObservationService;
pub use window_resolver::WindowResolver;
