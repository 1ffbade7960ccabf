pub mod memory;
pub mod view;

pub use memory::{DeviceCard, MemoryView, PlacedNotice, SensorSlot};
pub use view::{DashboardView, Notice, NoticeAnchor, NoticeId, StatusPatch, Tone};
