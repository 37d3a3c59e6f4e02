use tracing::error;
use tracing_subscriber::EnvFilter;

use holdem_server::driver;

fn parse_seed() -> u64 {
    std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let seed = parse_seed();
    if let Err(err) = driver::run(seed).await {
        error!(%err, "server terminated with an error");
        std::process::exit(1);
    }
}
