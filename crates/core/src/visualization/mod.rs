//! Alternate shapes over the same aggregation: treemap, heatmap and trends.

pub mod heatmap;
pub mod treemap;
pub mod trend;


pub use heatmap::{HeatmapBuilder, HeatmapCell, HeatmapRow, TOP_CATEGORIES};
pub use treemap::{TreemapBuilder, TreemapNode};
pub use trend::{DEFAULT_YEARS, MAX_YEARS, QuarterActual, TrendBuilder, TrendSeries, YearTrend};
