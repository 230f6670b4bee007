use figment::{Figment, providers::Env};

pub trait ContextProvider<Config> {
    fn new(config: Config) -> Self;
}

/// Initialize the application context with configuration from environment variables.
/// The configuration is extracted using figment.
///
/// # Arguments
/// None
///
/// # Returns
/// The application context built from the configuration as specified by the
/// trait.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables.
///
pub fn create_app_context<A, Config>() -> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
    Config: for<'de> serde::Deserialize<'de>,
{
    tracing_subscriber::fmt()
        .json()
        // allow log level to be overridden by RUST_LOG env var
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // stdout carries the rendered views, keep the log stream apart
        .with_writer(std::io::stderr)
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        .with_ansi(false)
        // the widget host stamps its own log lines
        .without_time()
        // remove the name of the function from every log entry
        .with_target(false)
        .init();

    let config = extract_config(Figment::new().merge(Env::raw()))?;

    tracing::debug!("configuration loaded");

    Ok(A::new(config))
}

/// Pull a typed configuration out of a prepared figment.
///
/// # Errors
/// If a required key is missing or a value has the wrong shape.
pub fn extract_config<Config>(figment: Figment) -> Result<Config, figment::Error>
where
    Config: for<'de> serde::Deserialize<'de>,
{
    figment.extract()
}
