use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caption_fetch::{fetcher, output, Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the envelope only, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caption_fetch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_lenient();
    let config = Config::default();

    let envelope = fetcher::run(cli.video_id.as_deref(), &config).await;

    // Exit status stays 0 whatever happens: callers read the envelope
    if let Err(err) = output::print_envelope(&envelope) {
        tracing::error!("Failed to write result: {:#}", err);
    }
}
