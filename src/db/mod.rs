pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;

pub use pool::DbPool;
pub use queries::LogQuery;
