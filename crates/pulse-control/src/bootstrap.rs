use crate::client::ApiClient;
use crate::error::Result;
use pulse_dashboard::{ChartHandle, ChartRegistry};
use pulse_types::SensorSeed;
use pulse_view::DashboardView;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// 拉取统计快照写入视图的统计卡片
pub async fn load_stats<V: DashboardView>(
    client: &ApiClient,
    view: &Arc<RwLock<V>>,
) -> Result<()> {
    let stats = client.stats().await?;
    view.write().await.apply_stats(&stats);
    Ok(())
}

/// 拉取某设备的种子数据并注册图表
///
/// 图表对象本身由调用方通过 make_handle 提供；这一步是
/// 滚动序列开始接收读数的前置条件。
pub async fn seed_charts<F>(
    client: &ApiClient,
    device_id: &str,
    charts: &Arc<RwLock<ChartRegistry>>,
    make_handle: F,
) -> Result<usize>
where
    F: Fn(&SensorSeed) -> Box<dyn ChartHandle>,
{
    let seeds = client.sensor_data(device_id).await?;

    let mut charts = charts.write().await;
    for seed in &seeds {
        charts.register(seed, make_handle(seed));
    }

    info!(device_id, charts = seeds.len(), "Sensor charts seeded");
    Ok(seeds.len())
}
