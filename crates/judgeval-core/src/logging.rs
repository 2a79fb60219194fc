//! Tracing setup for programs embedding the SDK.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed, e.g. with [`init`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::env::Env;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `JUDGMENT_LOG_LEVEL` is used.
/// `JUDGMENT_NO_COLOR` turns off ANSI colors. Later calls are no-ops.
pub fn init(env: &Env) {
    tracing_subscriber::registry()
        .with(filter(env))
        .with(fmt::layer().with_target(false).with_ansi(!env.no_color()))
        .try_init()
        .ok();
}

fn filter(env: &Env) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&env.log_level))
        .unwrap_or_else(|_| EnvFilter::new(crate::env::DEFAULT_LOG_LEVEL))
}
