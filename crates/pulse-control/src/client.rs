use crate::channel::ControlChannel;
use crate::error::Result;
use async_trait::async_trait;
use pulse_types::{CommandRequest, ControlReply, SensorSeed, StatSnapshot};
use tracing::debug;

/// 仪表盘 API 客户端
///
/// 控制接口之外还覆盖读侧端点：图表种子数据和统计快照。
/// 非 2xx 的应答体照常按 JSON 解析，服务端的 {"error": ...}
/// 就是要呈现的失败文案。
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// GET /dashboard/api/sensor-data/{device_id}
    pub async fn sensor_data(&self, device_id: &str) -> Result<Vec<SensorSeed>> {
        let url = format!("{}/dashboard/api/sensor-data/{}", self.base_url, device_id);
        debug!(%url, "Fetching sensor seed data");

        let seeds = self.client.get(&url).send().await?.json().await?;
        Ok(seeds)
    }

    /// GET /dashboard/api/stats
    pub async fn stats(&self) -> Result<StatSnapshot> {
        let url = format!("{}/dashboard/api/stats", self.base_url);
        debug!(%url, "Fetching dashboard stats");

        let stats = self.client.get(&url).send().await?.json().await?;
        Ok(stats)
    }
}

#[async_trait]
impl ControlChannel for ApiClient {
    /// POST /device/api/devices/{device_id}/control
    async fn send_command(
        &self,
        device_id: &str,
        request: &CommandRequest,
    ) -> Result<ControlReply> {
        let url = format!("{}/device/api/devices/{}/control", self.base_url, device_id);
        debug!(%url, command = %request.command, "Sending device command");

        let reply = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
