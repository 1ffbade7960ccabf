use crate::view::{DashboardView, Notice, NoticeAnchor, NoticeId, StatusPatch, Tone};
use pulse_types::StatSnapshot;
use std::collections::HashMap;
use tracing::trace;

/// 传感器槽位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSlot {
    /// 槽位内是否有显示节点
    pub has_display: bool,

    /// 当前显示值
    pub value: Option<String>,
}

/// 设备卡片
///
/// 一个设备可以对应多张卡片（列表行、详情页等）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceCard {
    pub device_id: String,
    pub status_marker: Option<String>,
    pub status_text: Option<String>,
    pub status_tone: Option<Tone>,
    pub last_seen: Option<String>,
    pub sensors: HashMap<String, SensorSlot>,
    pub has_control_form: bool,
}

impl DeviceCard {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Default::default()
        }
    }

    /// 添加带显示节点的传感器槽位
    pub fn with_sensor(mut self, sensor_id: impl Into<String>) -> Self {
        self.sensors.insert(
            sensor_id.into(),
            SensorSlot {
                has_display: true,
                value: None,
            },
        );
        self
    }

    /// 添加没有显示节点的传感器槽位
    pub fn with_bare_sensor(mut self, sensor_id: impl Into<String>) -> Self {
        self.sensors.insert(sensor_id.into(), SensorSlot::default());
        self
    }

    /// 标记卡片带有控制表单
    pub fn with_control_form(mut self) -> Self {
        self.has_control_form = true;
        self
    }

    /// 读取传感器显示值
    pub fn sensor_value(&self, sensor_id: &str) -> Option<&str> {
        self.sensors
            .get(sensor_id)
            .and_then(|slot| slot.value.as_deref())
    }
}

/// 已插入的通知
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNotice {
    pub anchor: NoticeAnchor,
    pub notice: Notice,
}

/// 内存视图
///
/// 无头环境下的仪表盘呈现状态，测试和模拟器都用它。
#[derive(Debug, Default)]
pub struct MemoryView {
    cards: Vec<DeviceCard>,
    notices: Vec<PlacedNotice>,
    stats: Option<StatSnapshot>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(mut self, card: DeviceCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn push_card(&mut self, card: DeviceCard) {
        self.cards.push(card);
    }

    /// 该设备的所有卡片
    pub fn cards<'a>(&'a self, device_id: &'a str) -> impl Iterator<Item = &'a DeviceCard> + 'a {
        self.cards.iter().filter(move |c| c.device_id == device_id)
    }

    /// 该设备的第一张卡片
    pub fn card(&self, device_id: &str) -> Option<&DeviceCard> {
        self.cards.iter().find(|c| c.device_id == device_id)
    }

    pub fn notices(&self) -> &[PlacedNotice] {
        &self.notices
    }

    pub fn notice(&self, id: NoticeId) -> Option<&PlacedNotice> {
        self.notices.iter().find(|n| n.notice.id == id)
    }

    pub fn stats(&self) -> Option<&StatSnapshot> {
        self.stats.as_ref()
    }
}

impl DashboardView for MemoryView {
    fn apply_status(&mut self, device_id: &str, patch: &StatusPatch) {
        for card in self.cards.iter_mut().filter(|c| c.device_id == device_id) {
            card.status_marker = Some(patch.marker.clone());
            card.status_text = Some(patch.marker.clone());
            card.status_tone = patch.tone;
            if let Some(last_seen) = &patch.last_seen {
                card.last_seen = Some(last_seen.clone());
            }
        }
    }

    fn has_device(&self, device_id: &str) -> bool {
        self.cards.iter().any(|c| c.device_id == device_id)
    }

    fn set_sensor_value(&mut self, device_id: &str, sensor_id: &str, value: f64) -> bool {
        // 遥测只作用于第一张匹配的卡片，与状态路径不同
        let Some(card) = self.cards.iter_mut().find(|c| c.device_id == device_id) else {
            return false;
        };
        let Some(slot) = card.sensors.get_mut(sensor_id) else {
            return false;
        };
        if !slot.has_display {
            return false;
        }
        slot.value = Some(value.to_string());
        true
    }

    fn has_control_form(&self, device_id: &str) -> bool {
        self.cards
            .iter()
            .any(|c| c.device_id == device_id && c.has_control_form)
    }

    fn insert_notice(&mut self, anchor: NoticeAnchor, notice: Notice) -> NoticeId {
        let id = notice.id;
        trace!(?anchor, message = %notice.message, "Notice inserted");
        self.notices.push(PlacedNotice { anchor, notice });
        id
    }

    fn remove_notice(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.notice.id != id);
        self.notices.len() != before
    }

    fn apply_stats(&mut self, stats: &StatSnapshot) {
        self.stats = Some(stats.clone());
    }
}
