use chrono::{DateTime, Local, Utc};
use pulse_types::SensorSeed;
use std::collections::HashMap;
use tracing::debug;

/// 默认的序列容量
pub const DEFAULT_CAPACITY: usize = 20;

/// 图表句柄
///
/// 外部图表对象的重绘边界；渲染本身不在本 crate 的职责内。
pub trait ChartHandle: Send + Sync {
    /// 序列变化后触发一次重绘
    fn redraw(&mut self, labels: &[String], values: &[f64]);
}

/// 什么都不画的图表句柄
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartHandle;

impl ChartHandle for NullChartHandle {
    fn redraw(&mut self, _labels: &[String], _values: &[f64]) {}
}

/// 单个传感器的滚动序列
///
/// labels 与 values 始终等长。
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
    handle: Box<dyn ChartHandle>,
}

impl ChartSeries {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 滚动图表注册表
///
/// 持有每个传感器的定容序列。append 只更新已注册的图表，
/// 从不创建新图表——注册只发生在外部种子初始化那一步。
pub struct ChartRegistry {
    capacity: usize,
    series: HashMap<String, ChartSeries>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            series: HashMap::new(),
        }
    }

    /// 用种子数据注册一个图表
    ///
    /// 种子超过容量时只保留最新的部分，容量不变式从注册起就成立。
    pub fn register(&mut self, seed: &SensorSeed, handle: Box<dyn ChartHandle>) {
        let mut labels = seed.data.labels.clone();
        let mut values = seed.data.values.clone();
        if labels.len() > self.capacity {
            labels.drain(..labels.len() - self.capacity);
        }
        if values.len() > self.capacity {
            values.drain(..values.len() - self.capacity);
        }

        debug!(sensor_id = %seed.id, points = values.len(), "Chart registered");
        self.series.insert(
            seed.id.clone(),
            ChartSeries {
                labels,
                values,
                handle,
            },
        );
    }

    pub fn contains(&self, sensor_id: &str) -> bool {
        self.series.contains_key(sensor_id)
    }

    pub fn series(&self, sensor_id: &str) -> Option<&ChartSeries> {
        self.series.get(sensor_id)
    }

    /// 追加一个数据点
    ///
    /// 未注册的传感器静默忽略。超过容量时淘汰最老的一对
    /// 标签 / 数值，然后通知图表句柄重绘。
    pub fn append(&mut self, sensor_id: &str, timestamp: DateTime<Utc>, value: f64) {
        let Some(series) = self.series.get_mut(sensor_id) else {
            return;
        };

        series.labels.push(time_label(timestamp));
        series.values.push(value);

        if series.labels.len() > self.capacity {
            series.labels.remove(0);
            series.values.remove(0);
        }

        series.handle.redraw(&series.labels, &series.values);
    }
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 时间戳的本地时刻标签
fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pulse_types::SeriesData;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// 记录重绘次数的句柄
    struct RecordingHandle {
        redraws: Arc<AtomicUsize>,
    }

    impl ChartHandle for RecordingHandle {
        fn redraw(&mut self, labels: &[String], values: &[f64]) {
            assert_eq!(labels.len(), values.len());
            self.redraws.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn seed(id: &str) -> SensorSeed {
        SensorSeed::empty(id, id)
    }

    #[test]
    fn test_append_without_series_creates_nothing() {
        let mut registry = ChartRegistry::new();
        registry.append("temperature", Utc::now(), 21.0);

        assert!(!registry.contains("temperature"));
    }

    #[test]
    fn test_series_never_exceeds_capacity() {
        let mut registry = ChartRegistry::new();
        registry.register(&seed("temperature"), Box::new(NullChartHandle));

        let start = Utc::now();
        for i in 0..25 {
            registry.append(
                "temperature",
                start + Duration::seconds(i),
                i as f64,
            );
        }

        let series = registry.series("temperature").unwrap();
        assert_eq!(series.len(), DEFAULT_CAPACITY);
        assert_eq!(series.labels().len(), DEFAULT_CAPACITY);
        // 留下来的最老条目是倒数第 20 次追加的那一个
        assert_eq!(series.values()[0], 5.0);
        assert_eq!(*series.values().last().unwrap(), 24.0);
    }

    #[test]
    fn test_redraw_after_every_append() {
        let redraws = Arc::new(AtomicUsize::new(0));
        let mut registry = ChartRegistry::new();
        registry.register(
            &seed("humidity"),
            Box::new(RecordingHandle {
                redraws: redraws.clone(),
            }),
        );

        for i in 0..3 {
            registry.append("humidity", Utc::now(), i as f64);
        }

        assert_eq!(redraws.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_oversized_seed_truncated_to_newest() {
        let mut registry = ChartRegistry::with_capacity(3);
        let seed = SensorSeed {
            id: "pressure".to_string(),
            name: "Pressure".to_string(),
            unit: Some("hPa".to_string()),
            data: SeriesData {
                labels: (0..5).map(|i| format!("10:00:0{}", i)).collect(),
                values: (0..5).map(f64::from).collect(),
            },
        };
        registry.register(&seed, Box::new(NullChartHandle));

        let series = registry.series("pressure").unwrap();
        assert_eq!(series.values(), &[2.0, 3.0, 4.0]);
        assert_eq!(series.labels()[0], "10:00:02");
    }

    #[test]
    fn test_independent_series() {
        let mut registry = ChartRegistry::new();
        registry.register(&seed("a"), Box::new(NullChartHandle));
        registry.register(&seed("b"), Box::new(NullChartHandle));

        registry.append("a", Utc::now(), 1.0);

        assert_eq!(registry.series("a").unwrap().len(), 1);
        assert!(registry.series("b").unwrap().is_empty());
    }
}
