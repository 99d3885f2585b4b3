//! Score Visualizer: ring geometry, sweep timing and the dashboard view-model.

pub mod dashboard;
pub mod easing;
pub mod ring;
pub mod svg;
pub mod tier;

pub use dashboard::ResultsDashboard;
pub use ring::{ArcAnimation, RingGeometry, DEFAULT_SIZE, DEFAULT_STROKE_WIDTH};
pub use svg::render_ring_svg;
