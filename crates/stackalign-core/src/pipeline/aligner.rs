use tracing::warn;

use crate::error::Result;
use crate::table::Table;

use super::config::{AlignConfig, StackParams};
use super::process::process_stack_reported;
use super::types::{AlignOutput, ProgressReporter};

/// Non-fatal conditions reported alongside a registration run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlignWarning {
    /// Tracking was requested but no tracking table is connected.
    MissingReference,
}

impl std::fmt::Display for AlignWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReference => write!(
                f,
                "Missing reference: Reference is not connected. Using data only."
            ),
        }
    }
}

/// Holds the current inputs and settings and recomputes the aligned stack
/// on demand.
///
/// Axis names missing from the config are filled in from the data table,
/// and the reference frame is clamped to the frames actually available.
#[derive(Clone, Debug, Default)]
pub struct StackAligner {
    pub config: AlignConfig,
    data: Option<Table>,
    tracking: Option<Table>,
}

impl StackAligner {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            data: None,
            tracking: None,
        }
    }

    pub fn set_data(&mut self, data: Option<Table>) {
        self.data = data;
    }

    pub fn set_reference(&mut self, tracking: Option<Table>) {
        self.tracking = tracking;
    }

    pub fn data(&self) -> Option<&Table> {
        self.data.as_ref()
    }

    /// The table shifts are estimated on, if tracking is enabled and connected.
    pub fn active_tracking(&self) -> Option<&Table> {
        if self.config.use_reference {
            self.tracking.as_ref()
        } else {
            None
        }
    }

    pub fn warnings(&self) -> Vec<AlignWarning> {
        let mut warnings = Vec::new();
        if self.config.use_reference && self.tracking.is_none() {
            warnings.push(AlignWarning::MissingReference);
        }
        warnings
    }

    /// Axis names from the config, falling back to the first two meta columns
    /// of the data table (the y axis repeats x when there is only one).
    pub fn resolve_axes(&self) -> Option<(String, String)> {
        let data = self.data.as_ref()?;
        let mut names = data.meta_names();
        let first = names.next().map(str::to_owned);
        let second = names.next().map(str::to_owned);

        let x = self.config.x_axis.clone().or(first)?;
        let y = self
            .config
            .y_axis
            .clone()
            .or(second)
            .unwrap_or_else(|| x.clone());
        Some((x, y))
    }

    /// Reference frame clamped to the last frame of the table shifts are
    /// estimated on.
    pub fn resolve_reference_frame(&self) -> usize {
        let frames = self
            .active_tracking()
            .or(self.data.as_ref())
            .map_or(0, Table::frame_count);
        self.config.reference_frame.min(frames.saturating_sub(1))
    }

    /// Resolved parameters for the current inputs, or `None` when there is
    /// nothing to align.
    pub fn params(&self) -> Option<StackParams> {
        let (x_axis, y_axis) = self.resolve_axes()?;
        Some(
            StackParams::new(x_axis, y_axis)
                .with_upsample_factor(self.config.upsample_factor)
                .with_filter(self.config.edge_filter())
                .with_reference_frame(self.resolve_reference_frame()),
        )
    }

    /// Run the registration for the current inputs.
    ///
    /// Returns `Ok(None)` when no data is connected, the data has no frames,
    /// or no axes can be chosen.
    pub fn commit(&self, reporter: &dyn ProgressReporter) -> Result<Option<AlignOutput>> {
        self.config.validate()?;
        let Some(data) = self.data.as_ref().filter(|d| d.frame_count() > 0) else {
            return Ok(None);
        };
        let Some(params) = self.params() else {
            return Ok(None);
        };
        for warning in self.warnings() {
            warn!("{warning}");
        }

        process_stack_reported(data, &params, self.active_tracking(), reporter).map(Some)
    }
}
