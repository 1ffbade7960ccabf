use serde::{Deserialize, Serialize};

/// 仪表盘全局配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub chart: ChartConfig,
    pub notice: NoticeConfig,
    pub simulator: SimulatorConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            chart: ChartConfig::default(),
            notice: NoticeConfig::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

/// 服务端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// API 基地址
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// 图表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 每个序列保留的数据点数
    pub capacity: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// 通知配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// 自动移除前的存活时长（毫秒）
    pub ttl_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self { ttl_ms: 5000 }
    }
}

/// 模拟器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// 模拟的设备数量
    pub devices: usize,

    /// 遥测上报间隔（秒）
    pub telemetry_interval_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            devices: 1,
            telemetry_interval_secs: 30,
        }
    }
}
