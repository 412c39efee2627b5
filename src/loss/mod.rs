pub mod rms;
pub mod running_average;

pub use rms::RmsError;
pub use running_average::{RecentAverage, DEFAULT_SMOOTHING_WINDOW};
