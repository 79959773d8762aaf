/// CLI Indexes: Datasets
pub mod datasets;

pub use crate::pipelines::Pipeline;
pub use datasets::Dataset;
