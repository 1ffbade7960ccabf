use thiserror::Error;

/// 控制路径错误类型
#[derive(Error, Debug)]
pub enum ControlError {
    /// 表单缺少指令字段
    #[error("Control form has no command field")]
    MissingCommand,

    /// 请求失败（网络错误或响应体不是合法 JSON）
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// 控制路径结果类型
pub type Result<T> = std::result::Result<T, ControlError>;
