use crate::command::CommandResponse;
use crate::device::{StatusUpdate, TelemetryFrame};
use serde::{Deserialize, Serialize};

/// 推送事件
///
/// 状态 / 遥测 / 指令响应三类入站事件的标签联合，
/// 由单一消费者按 FIFO 顺序分发。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PushEvent {
    /// 设备状态更新
    DeviceStatus {
        device_id: String,
        data: StatusUpdate,
    },

    /// 设备遥测数据
    DeviceTelemetry {
        device_id: String,
        data: TelemetryFrame,
    },

    /// 设备指令响应
    DeviceResponse {
        device_id: String,
        data: CommandResponse,
    },
}

impl PushEvent {
    /// 事件所属的设备
    pub fn device_id(&self) -> &str {
        match self {
            PushEvent::DeviceStatus { device_id, .. } => device_id,
            PushEvent::DeviceTelemetry { device_id, .. } => device_id,
            PushEvent::DeviceResponse { device_id, .. } => device_id,
        }
    }
}
