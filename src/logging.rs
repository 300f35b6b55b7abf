use crate::config::{Environment, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` wins when it names a known format; otherwise production
    /// logs JSON lines and every other environment logs human-readable text.
    pub fn resolve(env: &Environment, requested: Option<&str>) -> Self {
        match requested.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") | Some("text") => Self::Pretty,
            _ if env.is_prod() => Self::Json,
            _ => Self::Pretty,
        }
    }
}

fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "planforge_backend=debug,tower_http=debug,info",
        Environment::Staging => "planforge_backend=debug,tower_http=info,info",
        Environment::Prod => "planforge_backend=info,tower_http=info,warn",
    }
}

pub fn init_logging(settings: &Settings) {
    let env = &settings.env;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    let format = LogFormat::resolve(env, settings.log_format.as_deref());
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init(),
    }

    tracing::info!(format = ?format, "Logging initialized for {:?} environment", env);
}
