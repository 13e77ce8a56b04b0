pub mod pipeline;
pub mod report;

pub use pipeline::Pipeline;
