use tracing_subscriber::{fmt, EnvFilter};

pub fn initialize_logger(verbose: bool) {
    let default_directive = if verbose {
        "clipwrite=debug"
    } else {
        "clipwrite=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global logger");
}
