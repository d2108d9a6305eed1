use clap::Parser;
use github_stats_card::config::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    info!(login = %config.login, output = %config.output_dir.display(), "generating stats card");

    let written = github_stats_card::run(&config).await?;
    for path in &written {
        info!(path = %path.display(), "wrote card");
    }

    println!("Generated {} card file(s) in {}.", written.len(), config.output_dir.display());

    Ok(())
}
