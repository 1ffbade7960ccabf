pub mod chart;
pub mod dispatch;
pub mod notice;
pub mod status;
pub mod telemetry;

pub use chart::{ChartHandle, ChartRegistry, ChartSeries, NullChartHandle, DEFAULT_CAPACITY};
pub use dispatch::Dispatcher;
pub use notice::{NoticeRenderer, DEFAULT_NOTICE_TTL};
pub use status::StatusReconciler;
pub use telemetry::TelemetryReconciler;
