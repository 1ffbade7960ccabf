use crate::chart::ChartRegistry;
use crate::notice::NoticeRenderer;
use crate::status::StatusReconciler;
use crate::telemetry::TelemetryReconciler;
use pulse_types::{CommandResponse, PushEvent};
use pulse_view::{DashboardView, Notice, NoticeAnchor};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// 推送事件分发器
///
/// 单一消费者按 FIFO 顺序消费推送事件通道，路由到对应的
/// 协调器；指令响应事件在设备的控制表单后渲染一条通知。
pub struct Dispatcher<V: DashboardView> {
    view: Arc<RwLock<V>>,
    status: StatusReconciler<V>,
    telemetry: TelemetryReconciler<V>,
    notices: NoticeRenderer,
}

impl<V: DashboardView + 'static> Dispatcher<V> {
    pub fn new(
        view: Arc<RwLock<V>>,
        charts: Arc<RwLock<ChartRegistry>>,
        notices: NoticeRenderer,
    ) -> Self {
        Self {
            status: StatusReconciler::new(Arc::clone(&view)),
            telemetry: TelemetryReconciler::new(Arc::clone(&view), charts),
            notices,
            view,
        }
    }

    /// 处理单个事件
    pub async fn handle(&self, event: PushEvent) {
        match event {
            PushEvent::DeviceStatus { device_id, data } => {
                self.status.apply(&device_id, &data).await;
            }
            PushEvent::DeviceTelemetry { device_id, data } => {
                self.telemetry.apply(&device_id, &data).await;
            }
            PushEvent::DeviceResponse { device_id, data } => {
                self.handle_response(&device_id, &data).await;
            }
        }
    }

    /// 消费通道直到所有发送端关闭
    pub async fn run(&self, mut events: mpsc::Receiver<PushEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        debug!("Push event channel closed, dispatcher stopped");
    }

    async fn handle_response(&self, device_id: &str, response: &CommandResponse) {
        {
            let view = self.view.read().await;
            if !view.has_control_form(device_id) {
                return;
            }
        }

        let message = response.message.clone().unwrap_or_else(|| {
            if response.success {
                "Command executed successfully".to_string()
            } else {
                "Command failed".to_string()
            }
        });
        let notice = if response.success {
            Notice::success(message)
        } else {
            Notice::danger(message)
        };

        self.notices
            .render(
                &self.view,
                NoticeAnchor::AfterForm(device_id.to_string()),
                notice,
            )
            .await;
    }
}
