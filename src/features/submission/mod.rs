pub mod multipart;
pub mod pipeline;

pub use pipeline::{Acknowledged, PipelineState, SubmissionPipeline};
