use serde::{Deserialize, Serialize};

/// 仪表盘统计快照
///
/// GET /dashboard/api/stats 的应答。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSnapshot {
    pub device_count: DeviceCount,
    pub sensor_count: u64,
    /// 最近 24 小时的读数条数
    pub reading_count: u64,
    pub device_types: TypeDistribution,
}

/// 设备数量统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceCount {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
}

/// 设备类型分布（标签与数量一一对应）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDistribution {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// 传感器图表的种子数据
///
/// GET /dashboard/api/sensor-data/{device_id} 应答中的单个条目，
/// 用于初始化外部图表对象。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorSeed {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    pub data: SeriesData,
}

impl SensorSeed {
    /// 创建没有历史数据的种子
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: None,
            data: SeriesData::default(),
        }
    }

    /// 设置单位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// 并行的标签 / 数值序列
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}
