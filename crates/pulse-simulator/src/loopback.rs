use crate::device::SimDevice;
use async_trait::async_trait;
use pulse_control::{ControlChannel, Result};
use pulse_types::{CommandRequest, ControlReply, PushEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// 回环指令通道
///
/// 把指令直接交给进程内的模拟设备处理。应答文案与控制端点
/// 一致（指令已送达），设备自己的执行结果走推送通道上的
/// device_response 事件，和真实链路同构。
pub struct LoopbackChannel {
    devices: Arc<RwLock<HashMap<String, SimDevice>>>,
    events: mpsc::Sender<PushEvent>,
}

impl LoopbackChannel {
    pub fn new(
        devices: Arc<RwLock<HashMap<String, SimDevice>>>,
        events: mpsc::Sender<PushEvent>,
    ) -> Self {
        Self { devices, events }
    }
}

#[async_trait]
impl ControlChannel for LoopbackChannel {
    async fn send_command(
        &self,
        device_id: &str,
        request: &CommandRequest,
    ) -> Result<ControlReply> {
        let response = {
            let mut devices = self.devices.write().await;
            let Some(device) = devices.get_mut(device_id) else {
                return Ok(ControlReply::err(format!("Device not found: {}", device_id)));
            };
            device.handle_command(request)
        };

        debug!(device_id, command = %request.command, success = response.success, "Command handled");
        let _ = self
            .events
            .send(PushEvent::DeviceResponse {
                device_id: device_id.to_string(),
                data: response,
            })
            .await;

        Ok(ControlReply::ok(format!(
            "Command {} sent successfully",
            request.command
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DeviceKind;

    #[tokio::test]
    async fn test_reply_and_response_event() {
        let mut devices = HashMap::new();
        devices.insert(
            "dev_1".to_string(),
            SimDevice::with_id("dev_1", DeviceKind::Light),
        );
        let (tx, mut rx) = mpsc::channel(4);
        let channel = LoopbackChannel::new(Arc::new(RwLock::new(devices)), tx);

        let reply = channel
            .send_command("dev_1", &CommandRequest::new("power").with_param("state", "on"))
            .await
            .unwrap();

        assert!(!reply.is_error());
        assert_eq!(reply.message.as_deref(), Some("Command power sent successfully"));

        // 设备自己的执行结果走推送事件
        match rx.recv().await.unwrap() {
            PushEvent::DeviceResponse { device_id, data } => {
                assert_eq!(device_id, "dev_1");
                assert!(data.success);
                assert_eq!(data.message.as_deref(), Some("Power set to on"));
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_device_is_an_error_reply() {
        let (tx, mut rx) = mpsc::channel(4);
        let channel = LoopbackChannel::new(Arc::new(RwLock::new(HashMap::new())), tx);

        let reply = channel
            .send_command("ghost", &CommandRequest::new("power"))
            .await
            .unwrap();

        assert!(reply.is_error());
        assert!(rx.try_recv().is_err());
    }
}
