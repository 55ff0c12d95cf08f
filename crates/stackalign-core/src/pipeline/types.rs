use crate::crop::CropWindow;
use crate::frame::Shift;
use crate::table::Table;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Extracting,
    EstimatingShifts,
    Shifting,
    Cropping,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extracting => write!(f, "Building hypercube"),
            Self::EstimatingShifts => write!(f, "Estimating shifts"),
            Self::Shifting => write!(f, "Shifting frames"),
            Self::Cropping => write!(f, "Cropping"),
        }
    }
}

/// Result of a registration run.
#[derive(Clone, Debug)]
pub struct AlignOutput {
    /// One shift per frame, in frame order.
    pub shifts: Vec<Shift>,
    /// Region of the input frames that survived cropping.
    pub crop: CropWindow,
    /// Aligned and cropped stack, flattened back into a table.
    pub table: Table,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when no feedback is wanted.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
