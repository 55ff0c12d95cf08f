/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Minimum pixel count (h*w) to use row/column-level Rayon parallelism in the FFT.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Cross-power magnitudes below this are treated as zero during normalization.
pub const CROSS_POWER_EPSILON: f64 = 1e-12;

/// Default upsampling factor for shift estimation (integer-pixel precision).
pub const DEFAULT_UPSAMPLE_FACTOR: usize = 1;

/// Width (in pixels) of the window searched by the upsampled DFT around the
/// coarse correlation peak.
pub const UPSAMPLED_SEARCH_WINDOW: f64 = 1.5;

/// Coordinate differences smaller than `(max - min) / (len * LINSPACE_MIN_DIFF_DIVISOR)`
/// are treated as duplicates when inferring a grid step.
pub const LINSPACE_MIN_DIFF_DIVISOR: f64 = 100.0;

/// Differences up to this multiple of the first valid difference count toward
/// the mean grid step.
pub const LINSPACE_STEP_TOLERANCE: f64 = 1.01;

/// Edge-repeated border added around a frame before cubic spline prefiltering,
/// so the mirror boundary of the recursive filter does not reach real pixels.
pub const SPLINE_EDGE_PADDING: usize = 12;
