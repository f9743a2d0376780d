pub mod app;
pub mod ask;
pub mod metrics;
