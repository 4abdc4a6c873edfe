use log::LevelFilter;
use simplelog::{ConfigBuilder, SimpleLogger};

/// Installs a stdout logger that only lets this crate's records through.
pub fn setup_simple_logger(level: LevelFilter) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("twilio_webhook")
        .build();

    Ok(SimpleLogger::init(level, logger_config)?)
}

