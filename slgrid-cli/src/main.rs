use slgrid::cache::JsonFileBackend;
use slgrid::config::Config;
use slgrid::lookup::CapClient;
use slgrid::pipeline::Pipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(
        "Converting {} -> {} (cache: {})",
        config.input_file.display(),
        config.output_file.display(),
        config.cache_file.display()
    );

    let client = CapClient::from_config(&config)?;
    info!("Resolving regions via {}", client.cap_url());
    let pipeline = Pipeline::new(client, JsonFileBackend::new(&config.cache_file));
    let summary = pipeline
        .run(&config.input_file, &config.output_file)
        .await?;

    println!(
        "{} station(s) written to {}",
        summary.records,
        config.output_file.display()
    );

    Ok(())
}
