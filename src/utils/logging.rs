use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Result, SineError};

pub fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(crate::utils::consts::LOG_LEVEL))
        .map_err(|e| SineError::Logging(e.to_string()))?;

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stdout)
        .try_init()
        .map_err(|e| SineError::Logging(e.to_string()))
}
