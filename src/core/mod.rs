pub mod add;
pub mod aggregator;
pub mod backup;
pub mod del;
pub mod import;
pub mod list;
pub mod log;
pub mod month;
pub mod normalizer;
