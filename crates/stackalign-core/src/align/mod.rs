pub mod fft;
pub mod filter;
pub mod interpolate;
pub mod phase_correlation;
mod stack;
pub mod upsampled;

pub use filter::EdgeFilter;
pub use interpolate::{shift_fill, shift_frame};
pub use phase_correlation::register_translation;
pub use stack::{align_stack, align_stack_with_shifts, calculate_stack_shifts};
