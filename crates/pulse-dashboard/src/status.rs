use chrono::{DateTime, Local, Utc};
use pulse_types::{DeviceStatus, StatusUpdate};
use pulse_view::{DashboardView, StatusPatch, Tone};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// 状态协调器
///
/// 把入站的设备状态事件套用到视图里该设备的所有卡片上。
/// 没有匹配卡片时是无操作，不是错误。
pub struct StatusReconciler<V: DashboardView> {
    view: Arc<RwLock<V>>,
}

impl<V: DashboardView> StatusReconciler<V> {
    pub fn new(view: Arc<RwLock<V>>) -> Self {
        Self { view }
    }

    /// 应用一次状态更新
    pub async fn apply(&self, device_id: &str, update: &StatusUpdate) {
        let patch = StatusPatch {
            marker: update.status.clone(),
            tone: status_tone(&update.device_status()),
            last_seen: update.timestamp.map(format_last_seen),
        };

        let mut view = self.view.write().await;
        view.apply_status(device_id, &patch);
        debug!(device_id, status = %update.status, "Device status applied");
    }
}

/// 固定的状态到颜色类映射
///
/// 未识别的状态不设置任何颜色类，不折算成默认值。
fn status_tone(status: &DeviceStatus) -> Option<Tone> {
    match status {
        DeviceStatus::Online => Some(Tone::Success),
        DeviceStatus::Offline => Some(Tone::Secondary),
        DeviceStatus::Error => Some(Tone::Danger),
        DeviceStatus::Other(_) => None,
    }
}

/// 最后上线时间的本地化呈现
fn format_last_seen(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
