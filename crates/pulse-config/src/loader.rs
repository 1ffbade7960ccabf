use anyhow::{anyhow, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};

use crate::DashboardConfig;

/// 配置文件名
const CONFIG_FILE: &str = "pulse.toml";

/// 配置加载器
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// 创建配置加载器
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    /// 加载配置
    pub fn load(&self) -> Result<DashboardConfig> {
        let config_path = self.config_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            // 配置文件不存在时返回默认配置
            return Ok(DashboardConfig::default());
        }

        let config = Config::builder()
            .add_source(File::new(
                config_path
                    .to_str()
                    .ok_or_else(|| anyhow!("Invalid config path"))?,
                FileFormat::Toml,
            ))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        let config = self.load()?;

        if config.chart.capacity == 0 {
            return Err(anyhow!("chart.capacity must be greater than 0"));
        }

        if config.notice.ttl_ms == 0 {
            return Err(anyhow!("notice.ttl_ms must be greater than 0"));
        }

        if config.server.base_url.is_empty() {
            return Err(anyhow!("server.base_url must not be empty"));
        }

        Ok(())
    }
}
