pub mod device;
pub mod loopback;
pub mod profile;

pub use device::SimDevice;
pub use loopback::LoopbackChannel;
pub use profile::{DeviceKind, ThermostatMode};
