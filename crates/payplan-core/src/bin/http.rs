#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use payplan::{Config, EnglishFormatter, Session, http_api};
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "payplan=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("reading configuration")?;
    let session = Session::with_formatter(Box::new(EnglishFormatter::with_currency(
        config.currency.clone(),
    )));

    println!("payplan HTTP API listening on http://{}", config.http_addr);
    http_api::serve(config.http_addr, session).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
