pub mod loader;
pub mod model;

pub use loader::ConfigLoader;
pub use model::{ChartConfig, DashboardConfig, NoticeConfig, ServerConfig, SimulatorConfig};
