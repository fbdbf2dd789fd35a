use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Initialize logging on stderr so command output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if a directive fails to parse or a global subscriber is
/// already installed.
pub fn init(verbosity_level: Option<Level>, json: bool) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("reqwest=warn".parse()?);

    let (plain, structured) = if json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(false);
        (None, Some(layer))
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_target(false);
        (Some(layer), None)
    };

    let subscriber = Registry::default()
        .with(plain)
        .with(structured)
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
