use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::align::EdgeFilter;
use crate::consts::DEFAULT_UPSAMPLE_FACTOR;
use crate::error::{Result, StackAlignError};

/// User-facing registration settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Table variable used as the x (column) axis. Defaults to the first
    /// meta column of the input table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    /// Table variable used as the y (row) axis. Defaults to the second meta
    /// column, or the x axis when the table has only one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    /// Estimate shifts on the tracking table instead of the data itself.
    pub use_reference: bool,
    /// Correlate the Sobel derivative across rows instead of raw frames.
    pub sobel_filter: bool,
    /// Sub-pixel precision of shift estimation: 1 / upsample_factor pixels.
    pub upsample_factor: usize,
    /// Zero-based index of the frame the stack is aligned to.
    pub reference_frame: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            x_axis: None,
            y_axis: None,
            use_reference: false,
            sobel_filter: false,
            upsample_factor: DEFAULT_UPSAMPLE_FACTOR,
            reference_frame: 0,
        }
    }
}

impl AlignConfig {
    pub fn validate(&self) -> Result<()> {
        if self.upsample_factor == 0 {
            return Err(StackAlignError::InvalidConfig(
                "upsample factor must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn edge_filter(&self) -> EdgeFilter {
        EdgeFilter::from_sobel_flag(self.sobel_filter)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// Fully resolved parameters for one registration run.
#[derive(Clone, Debug, PartialEq)]
pub struct StackParams {
    pub x_axis: String,
    pub y_axis: String,
    pub upsample_factor: usize,
    pub filter: EdgeFilter,
    pub reference_frame: usize,
}

impl StackParams {
    pub fn new(x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Self {
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            upsample_factor: DEFAULT_UPSAMPLE_FACTOR,
            filter: EdgeFilter::None,
            reference_frame: 0,
        }
    }

    pub fn with_upsample_factor(mut self, upsample_factor: usize) -> Self {
        self.upsample_factor = upsample_factor;
        self
    }

    pub fn with_filter(mut self, filter: EdgeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_reference_frame(mut self, reference_frame: usize) -> Self {
        self.reference_frame = reference_frame;
        self
    }
}
