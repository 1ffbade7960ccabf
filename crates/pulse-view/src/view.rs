use pulse_types::StatSnapshot;
use uuid::Uuid;

/// 配色色调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// 成功（绿色）
    Success,
    /// 次要（灰色）
    Secondary,
    /// 危险（红色）
    Danger,
}

impl Tone {
    /// 状态文本的颜色类名
    pub fn text_class(&self) -> &'static str {
        match self {
            Tone::Success => "text-success",
            Tone::Secondary => "text-secondary",
            Tone::Danger => "text-danger",
        }
    }

    /// 行内通知的样式类名
    pub fn alert_class(&self) -> &'static str {
        match self {
            Tone::Success => "alert-success",
            Tone::Secondary => "alert-secondary",
            Tone::Danger => "alert-danger",
        }
    }
}

/// 状态补丁
///
/// 状态协调器写入视图的最小单元；一次补丁作用于
/// 该设备的全部卡片。
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPatch {
    /// 原始状态字符串，同时作为状态标记和状态文本
    pub marker: String,

    /// 状态文本的颜色类；未识别的状态不设置颜色
    pub tone: Option<Tone>,

    /// 本地化格式的最后上线时间；为空时保留旧值
    pub last_seen: Option<String>,
}

/// 通知标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(Uuid);

impl NoticeId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// 通知插入位置
///
/// 两条路径（状态响应、指令提交）都把通知插到控制表单后面。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeAnchor {
    /// 紧跟在设备控制表单之后
    AfterForm(String),
}

/// 行内通知
///
/// 生命周期：created → inserted → (dismissed | expired) → removed，
/// 不存在回退转移。
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub tone: Tone,
    pub message: String,
    /// 是否带手动关闭控件
    pub dismissible: bool,
}

impl Notice {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            id: NoticeId::new(),
            tone,
            message: message.into(),
            dismissible: true,
        }
    }

    /// 成功样式的通知
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Tone::Success, message)
    }

    /// 失败样式的通知
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Tone::Danger, message)
    }
}

/// 仪表盘视图抽象
///
/// 协调器只通过这个窄接口修改呈现状态，让核心逻辑可以在
/// 没有真实前端的环境里测试。所有写操作对缺失的目标都是
/// 无操作，从不报错。
pub trait DashboardView: Send + Sync {
    /// 把状态补丁应用到该设备的所有卡片；零个匹配是无操作
    fn apply_status(&mut self, device_id: &str, patch: &StatusPatch);

    /// 视图中是否存在该设备的卡片
    fn has_device(&self, device_id: &str) -> bool;

    /// 写入传感器显示值；只有槽位及其显示节点都存在时才生效，
    /// 返回值表示是否写入
    fn set_sensor_value(&mut self, device_id: &str, sensor_id: &str, value: f64) -> bool;

    /// 视图中是否存在该设备的控制表单
    fn has_control_form(&self, device_id: &str) -> bool;

    /// 在指定位置插入通知，返回其标识
    fn insert_notice(&mut self, anchor: NoticeAnchor, notice: Notice) -> NoticeId;

    /// 移除通知；目标已不存在时返回 false（幂等）
    fn remove_notice(&mut self, id: NoticeId) -> bool;

    /// 更新统计卡片
    fn apply_stats(&mut self, stats: &StatSnapshot);
}
