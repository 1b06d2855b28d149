//! 日志基础设施

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 初始化全局日志，`RUST_LOG` 优先于配置的级别
    ///
    /// Lambda 环境下关闭颜色和时间戳，时间由平台记录。
    pub fn init(level: &str, lambda: bool) -> Result<()> {
        let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false);

        let result = if lambda {
            builder.with_ansi(false).without_time().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow!("日志初始化失败: {e}"))
    }
}
