use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 设备状态
///
/// 线上传输的是裸字符串；未识别的值按原样保留，不做默认归类。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    /// 在线
    Online,
    /// 离线
    Offline,
    /// 故障
    Error,
    /// 未识别的状态
    Other(String),
}

impl DeviceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Error => "error",
            DeviceStatus::Other(s) => s.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "online" => DeviceStatus::Online,
            "offline" => DeviceStatus::Offline,
            "error" => DeviceStatus::Error,
            _ => DeviceStatus::Other(s.to_string()),
        }
    }
}

/// 设备状态事件载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    /// 状态字符串（online / offline / error，其余值原样保留）
    pub status: String,

    /// 最后上线时间
    pub timestamp: Option<DateTime<Utc>>,
}

impl StatusUpdate {
    /// 创建新的状态载荷
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            timestamp: None,
        }
    }

    /// 设置时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// 解析为设备状态
    pub fn device_status(&self) -> DeviceStatus {
        DeviceStatus::from_str(&self.status)
    }
}

/// 遥测事件载荷
///
/// readings 保持映射的插入顺序；字段缺失时按空映射处理。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryFrame {
    /// 采样时间
    pub timestamp: DateTime<Utc>,

    /// 传感器读数
    #[serde(default)]
    pub readings: serde_json::Map<String, serde_json::Value>,
}

impl TelemetryFrame {
    /// 创建空的遥测帧
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            readings: serde_json::Map::new(),
        }
    }

    /// 追加一个数值读数
    pub fn with_reading(mut self, sensor_id: impl Into<String>, value: f64) -> Self {
        self.readings.insert(sensor_id.into(), value.into());
        self
    }

    /// 按插入顺序遍历数值型读数，非数值的读数被跳过
    pub fn numeric_readings(&self) -> impl Iterator<Item = (&str, f64)> {
        self.readings
            .iter()
            .filter_map(|(id, value)| value.as_f64().map(|v| (id.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(DeviceStatus::from_str("online"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::Offline.as_str(), "offline");
    }

    #[test]
    fn test_unknown_status_preserved() {
        // 未识别的状态不折算成任何默认值
        let status = DeviceStatus::from_str("rebooting");
        assert_eq!(status, DeviceStatus::Other("rebooting".to_string()));
        assert_eq!(status.as_str(), "rebooting");
    }

    #[test]
    fn test_telemetry_missing_readings() {
        let frame: TelemetryFrame =
            serde_json::from_str(r#"{"timestamp": "2024-05-01T10:00:00Z"}"#).unwrap();
        assert!(frame.readings.is_empty());
    }

    #[test]
    fn test_telemetry_reading_order() {
        let frame: TelemetryFrame = serde_json::from_str(
            r#"{"timestamp": "2024-05-01T10:00:00Z",
                "readings": {"temperature": 22.5, "humidity": 40, "pressure": 1013.25}}"#,
        )
        .unwrap();

        let ids: Vec<&str> = frame.numeric_readings().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["temperature", "humidity", "pressure"]);
    }

    #[test]
    fn test_non_numeric_readings_skipped() {
        let frame = TelemetryFrame {
            timestamp: Utc::now(),
            readings: serde_json::from_str(r#"{"mode": "auto", "temperature": 21.0}"#).unwrap(),
        };

        let readings: Vec<(&str, f64)> = frame.numeric_readings().collect();
        assert_eq!(readings, vec![("temperature", 21.0)]);
    }
}
