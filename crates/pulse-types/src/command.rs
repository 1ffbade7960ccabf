use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 设备控制指令请求
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRequest {
    /// 指令名称
    pub command: String,

    /// 指令参数（扁平的字符串键值对）
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl CommandRequest {
    /// 创建无参数的指令请求
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            params: HashMap::new(),
        }
    }

    /// 追加一个参数
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// 读取参数值
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// 控制接口的 HTTP 应答
///
/// error 字段存在即视为失败，其值就是要呈现的文案。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ControlReply {
    /// 成功应答
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    /// 失败应答
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// 推送通道上的指令响应载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    /// 对应的指令名称
    pub command: Option<String>,

    /// 是否执行成功
    pub success: bool,

    /// 设备侧的说明文案
    pub message: Option<String>,

    /// 响应时间
    pub timestamp: Option<DateTime<Utc>>,
}

impl CommandResponse {
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            command: None,
            success,
            message: Some(message.into()),
            timestamp: Some(Utc::now()),
        }
    }

    /// 标注对应的指令名称
    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}
