use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theater_seating::{
    config::{Config, OutputFormat},
    services::report,
    Theater,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    match config.app.log_format {
        OutputFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        OutputFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting theater seating ({})", config.app.environment);

    let theater = Theater::load(config).context("failed to load theater data")?;

    let summary = report::aggregate(
        theater
            .auditoriums()
            .iter()
            .map(|auditorium| (auditorium.number(), auditorium.grid())),
        &theater.config().pricing,
    );
    match theater.config().app.report_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print!("{summary}"),
    }

    if theater.config().data.save_on_exit {
        let output_dir = &theater.config().data.output_dir;
        let written = theater
            .save_all(output_dir)
            .with_context(|| format!("failed to write auditoriums to {}", output_dir.display()))?;
        for path in &written {
            info!("Saved {}", path.display());
        }
    }

    Ok(())
}
