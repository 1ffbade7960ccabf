use crate::error::{ControlError, Result};
use pulse_types::CommandRequest;
use std::collections::HashMap;

/// 参数字段的命名前缀
const PARAM_PREFIX: &str = "param_";

/// 设备控制表单
///
/// 字段命名约定：指令字段名为 command，参数字段以 param_
/// 为前缀；组装请求时前缀被剥掉。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlForm {
    device_id: String,
    fields: Vec<(String, String)>,
}

impl ControlForm {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            fields: Vec::new(),
        }
    }

    /// 追加一个输入字段
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// 选中的指令值
    pub fn command(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == "command")
            .map(|(_, value)| value.as_str())
    }

    /// 收集 param_ 前缀字段为扁平参数映射
    pub fn params(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(PARAM_PREFIX)
                    .map(|stripped| (stripped.to_string(), value.clone()))
            })
            .collect()
    }

    /// 组装指令请求
    pub fn to_request(&self) -> Result<CommandRequest> {
        let command = self.command().ok_or(ControlError::MissingCommand)?;
        Ok(CommandRequest {
            command: command.to_string(),
            params: self.params(),
        })
    }
}
