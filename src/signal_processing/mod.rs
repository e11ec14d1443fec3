pub mod bandpass;
pub mod filter;
pub mod one_pole;
pub mod running_stats;

pub use bandpass::BandpassFilter;
pub use filter::Filter;
pub use one_pole::{FilterKind, OnePoleFilter};
pub use running_stats::{RunningStatistics, StatisticsSnapshot};
