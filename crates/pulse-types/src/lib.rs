pub mod command;
pub mod device;
pub mod event;
pub mod stats;

pub use command::{CommandRequest, CommandResponse, ControlReply};
pub use device::{DeviceStatus, StatusUpdate, TelemetryFrame};
pub use event::PushEvent;
pub use stats::{DeviceCount, SensorSeed, SeriesData, StatSnapshot, TypeDistribution};
