use pulse_view::{DashboardView, Notice, NoticeAnchor, NoticeId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// 默认的通知存活时长
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(5000);

/// 通知渲染器
///
/// 插入可手动关闭的行内通知，并调度固定时长后的自动移除。
/// 到期任务一经调度不可取消；它与手动关闭的竞争靠视图的
/// 幂等移除消解。各次调用互不干扰，每条通知有自己的定时器。
#[derive(Debug, Clone)]
pub struct NoticeRenderer {
    ttl: Duration,
}

impl NoticeRenderer {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_NOTICE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// 插入通知并调度自动移除，返回通知标识
    pub async fn render<V>(
        &self,
        view: &Arc<RwLock<V>>,
        anchor: NoticeAnchor,
        notice: Notice,
    ) -> NoticeId
    where
        V: DashboardView + 'static,
    {
        let id = notice.id;
        view.write().await.insert_notice(anchor, notice);

        let view = Arc::clone(view);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // 用户可能已经手动关闭了；目标不存在时移除是无操作
            view.write().await.remove_notice(id);
        });

        debug!(ttl_ms = ttl.as_millis() as u64, "Notice scheduled for removal");
        id
    }

    /// 手动关闭一条通知
    pub async fn dismiss<V: DashboardView>(&self, view: &Arc<RwLock<V>>, id: NoticeId) {
        view.write().await.remove_notice(id);
    }
}

impl Default for NoticeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_view::MemoryView;
    use tokio::time::advance;

    fn shared() -> Arc<RwLock<MemoryView>> {
        Arc::new(RwLock::new(MemoryView::new()))
    }

    fn anchor() -> NoticeAnchor {
        NoticeAnchor::AfterForm("dev_1".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_expires_at_ttl() {
        let view = shared();
        let renderer = NoticeRenderer::new();

        let id = renderer.render(&view, anchor(), Notice::success("done")).await;
        tokio::task::yield_now().await;

        advance(Duration::from_millis(4999)).await;
        assert!(view.read().await.notice(id).is_some());

        advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(view.read().await.notice(id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_then_timer_is_harmless() {
        let view = shared();
        let renderer = NoticeRenderer::new();

        let id = renderer.render(&view, anchor(), Notice::danger("failed")).await;
        tokio::task::yield_now().await;

        renderer.dismiss(&view, id).await;
        assert!(view.read().await.notice(id).is_none());

        // 定时器随后照常触发，目标已不存在也不报错
        advance(DEFAULT_NOTICE_TTL).await;
        tokio::task::yield_now().await;
        assert!(view.read().await.notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_are_independent() {
        let view = shared();
        let renderer = NoticeRenderer::new();

        let first = renderer.render(&view, anchor(), Notice::success("first")).await;
        tokio::task::yield_now().await;

        advance(Duration::from_millis(3000)).await;
        let second = renderer.render(&view, anchor(), Notice::success("second")).await;
        tokio::task::yield_now().await;

        // 第一条到期时第二条还活着
        advance(Duration::from_millis(2000)).await;
        tokio::task::yield_now().await;
        assert!(view.read().await.notice(first).is_none());
        assert!(view.read().await.notice(second).is_some());

        advance(Duration::from_millis(3000)).await;
        tokio::task::yield_now().await;
        assert!(view.read().await.notice(second).is_none());
    }
}
