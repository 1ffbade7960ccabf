use crate::error::Result;
use async_trait::async_trait;
use pulse_types::{CommandRequest, ControlReply};

/// 指令通道 trait
///
/// 把指令请求送达设备侧并取回应答的传输边界。
#[async_trait]
pub trait ControlChannel: Send + Sync {
    /// 发送指令并等待应答
    async fn send_command(&self, device_id: &str, request: &CommandRequest)
        -> Result<ControlReply>;
}
