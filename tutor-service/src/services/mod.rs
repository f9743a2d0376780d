pub mod metrics;
pub mod pipeline;
pub mod providers;

pub use pipeline::TutorPipeline;
