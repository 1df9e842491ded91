//! 日志初始化
//!
//! `RUST_LOG` 优先于传入的默认级别

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::error::{GuardError, Result};

/// 安装全局 tracing 订阅者；`json` 为 true 时输出结构化日志
pub fn init_tracing(level: Level, json: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive(directive("hyper=warn")?)
        .add_directive(directive("tower=warn")?);

    let installed = if json {
        let subscriber = Registry::default()
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = Registry::default()
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)
    };

    installed.map_err(|err| GuardError::configuration(format!("tracing already installed: {err}")))
}

fn directive(value: &str) -> Result<tracing_subscriber::filter::Directive> {
    value
        .parse()
        .map_err(|err| GuardError::configuration(format!("invalid log directive {value}: {err}")))
}
