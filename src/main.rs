use anyhow::{Context, Result};
use bench_drawer::chart::{render_svg, DEFAULT_FIGURE_SIZE};
use bench_drawer::{load_series, ComparisonDataset, Operation, Orientation};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bench-drawer")]
#[command(about = "Chart per-operation benchmark timings of two implementations side by side")]
struct Cli {
    /// Timings of the first implementation, one sample per line
    first: PathBuf,

    /// Timings of the second implementation, one sample per line
    second: PathBuf,

    /// Output path for the figure
    #[arg(short, long, default_value = "comparison.svg")]
    output: PathBuf,

    /// Panel titles, one per column, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = Operation::default_labels())]
    labels: Vec<String>,

    /// Rotate the sample matrix like the legacy drawer instead of transposing it
    #[arg(long, default_value = "false")]
    legacy_rotation: bool,

    /// Figure width in pixels
    #[arg(long, default_value_t = DEFAULT_FIGURE_SIZE.0)]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = DEFAULT_FIGURE_SIZE.1)]
    height: u32,

    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

impl Cli {
    fn orientation(&self) -> Orientation {
        if self.legacy_rotation {
            Orientation::Rotate90
        } else {
            Orientation::Transpose
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let orientation = cli.orientation();
    log::debug!("Using {:?} orientation", orientation);

    let first = load_series(&cli.first, orientation)
        .with_context(|| format!("Failed to load first input {}", cli.first.display()))?;
    let second = load_series(&cli.second, orientation)
        .with_context(|| format!("Failed to load second input {}", cli.second.display()))?;

    log::info!(
        "first: {} samples, second: {} samples, {} operations",
        first.sample_count(),
        second.sample_count(),
        first.operation_count()
    );

    let dataset = ComparisonDataset::pair(first, second);
    let panels = render_svg(&cli.output, (cli.width, cli.height), &dataset, &cli.labels)?;
    log::debug!("Drew {} panels", panels);

    Ok(())
}
