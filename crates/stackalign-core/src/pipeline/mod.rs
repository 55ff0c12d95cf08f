mod aligner;
pub mod config;
mod process;
mod types;

pub use aligner::{AlignWarning, StackAligner};
pub use config::{AlignConfig, StackParams};
pub use process::{process_stack, process_stack_reported};
pub use types::{AlignOutput, NoOpReporter, PipelineStage, ProgressReporter};
