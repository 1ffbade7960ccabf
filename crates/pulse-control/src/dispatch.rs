use crate::channel::ControlChannel;
use crate::error::Result;
use crate::form::ControlForm;
use pulse_dashboard::NoticeRenderer;
use pulse_view::{DashboardView, Notice, NoticeAnchor, NoticeId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// 传输失败时的固定提示文案
pub const GENERIC_FAILURE: &str = "An error occurred while sending the command.";

/// 指令分发器
///
/// 拦截表单提交，通过指令通道发出请求，并把结果渲染成
/// 紧跟在表单后的一条通知。每次提交渲染且仅渲染一条；
/// 传输失败被吸收成固定的失败文案，从不向上传播。
pub struct CommandDispatcher<V: DashboardView> {
    channel: Box<dyn ControlChannel>,
    view: Arc<RwLock<V>>,
    notices: NoticeRenderer,
}

impl<V: DashboardView + 'static> CommandDispatcher<V> {
    pub fn new(
        channel: Box<dyn ControlChannel>,
        view: Arc<RwLock<V>>,
        notices: NoticeRenderer,
    ) -> Self {
        Self {
            channel,
            view,
            notices,
        }
    }

    /// 提交一次控制表单
    ///
    /// 应答里 error 字段存在即失败，其值就是文案；否则取
    /// message 作为成功文案。
    pub async fn submit(&self, form: &ControlForm) -> Result<NoticeId> {
        let request = form.to_request()?;
        let anchor = NoticeAnchor::AfterForm(form.device_id().to_string());

        let notice = match self.channel.send_command(form.device_id(), &request).await {
            Ok(reply) => match reply.error {
                Some(error) => Notice::danger(error),
                None => Notice::success(reply.message.unwrap_or_default()),
            },
            Err(err) => {
                warn!(device_id = %form.device_id(), error = %err, "Command request failed");
                Notice::danger(GENERIC_FAILURE)
            }
        };

        Ok(self.notices.render(&self.view, anchor, notice).await)
    }
}
