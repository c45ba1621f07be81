pub mod builder;
pub mod mmlu;
pub mod prompt;
pub mod screenshot;
pub mod types;

pub use builder::build_samples;
pub use types::{BuildOutput, BuildParams, BuildWarning, Sample, SampleMetadata};
