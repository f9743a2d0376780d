pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use config::Settings;
use metrics_exporter_prometheus::PrometheusHandle;
use services::TutorPipeline;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pipeline: TutorPipeline,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(settings: Settings, pipeline: TutorPipeline, metrics: PrometheusHandle) -> Self {
        Self {
            settings: Arc::new(settings),
            pipeline,
            metrics,
        }
    }
}
