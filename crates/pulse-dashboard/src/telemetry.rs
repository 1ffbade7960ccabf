use crate::chart::ChartRegistry;
use pulse_types::TelemetryFrame;
use pulse_view::DashboardView;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// 遥测协调器
///
/// 把遥测读数写入传感器显示位，并把每一个读数转发给滚动
/// 图表注册表。显示位是否存在不影响图表：没有可见元素的
/// 传感器，序列照样前进。
pub struct TelemetryReconciler<V: DashboardView> {
    view: Arc<RwLock<V>>,
    charts: Arc<RwLock<ChartRegistry>>,
}

impl<V: DashboardView> TelemetryReconciler<V> {
    pub fn new(view: Arc<RwLock<V>>, charts: Arc<RwLock<ChartRegistry>>) -> Self {
        Self { view, charts }
    }

    /// 应用一帧遥测数据
    ///
    /// 设备卡片不存在时整帧都是无操作。读数按映射插入顺序处理。
    pub async fn apply(&self, device_id: &str, frame: &TelemetryFrame) {
        let mut view = self.view.write().await;
        if !view.has_device(device_id) {
            return;
        }

        let mut charts = self.charts.write().await;
        for (sensor_id, value) in frame.numeric_readings() {
            view.set_sensor_value(device_id, sensor_id, value);
            charts.append(sensor_id, frame.timestamp, value);
        }
        debug!(device_id, readings = frame.readings.len(), "Telemetry applied");
    }
}
