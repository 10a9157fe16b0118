use anyhow::{Context, Result};
use pathviz_demo::{VisualizerConfig, logging, terminal};

fn main() -> Result<()> {
    let config = VisualizerConfig::from_env();
    // Dropped last, flushing everything logged below.
    let _guard = logging::init(&config.log_dir)?;

    tracing::info!(
        grid_size = config.grid_size,
        density = config.obstacle_density,
        speed = config.speed,
        algorithm = %config.algorithm,
        "starting visualizer"
    );

    terminal::run(&config).context("visualizer terminated abnormally")?;

    tracing::info!("visualizer closed");
    Ok(())
}
