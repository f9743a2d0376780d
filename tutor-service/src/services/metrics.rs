//! Prometheus metrics for tutor-service.
//!
//! HTTP request series are recorded by the shared middleware; this module adds
//! the answer-pipeline series and owns the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const QUESTIONS_TOTAL: &str = "tutor_questions_total";
pub const STAGE_DURATION_SECONDS: &str = "tutor_stage_duration_seconds";

/// Pipeline stage label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieve,
    Generate,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Retrieve => "retrieve",
            Stage::Generate => "generate",
        }
    }
}

/// Install the global recorder. Safe to call more than once; later calls
/// return the handle of the first installation.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(e) => {
                // Another recorder owns the global slot; expose an empty registry.
                tracing::warn!(error = %e, "Prometheus recorder already installed");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

pub fn record_stage(stage: Stage, elapsed: Duration) {
    histogram!(STAGE_DURATION_SECONDS, "stage" => stage.as_str()).record(elapsed.as_secs_f64());
}

pub fn record_question(outcome: &'static str) {
    counter!(QUESTIONS_TOTAL, "outcome" => outcome).increment(1);
}
