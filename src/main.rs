use matrix_rescue::config::{Cli, Config};
use matrix_rescue::grid::{gen_grid, parse_grid, solution_string, visualize};
use matrix_rescue::solver::RescueSolver;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("error reading config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let grid = if let Some(grid) = &config.grid {
        grid.clone()
    } else if let Some(path) = &config.grid_path {
        std::fs::read_to_string(path).with_context(|| format!("error reading grid file: {path}"))?
    } else {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid = gen_grid(&mut rng);
        info!("Generated grid: {grid}");
        grid
    };

    let initial = parse_grid(&grid).with_context(|| format!("error parsing grid: {grid}"))?;
    let solver = RescueSolver::new(initial);
    let solution = solver.solve(config.strategy()?, &config);

    if config.visualize {
        print!("{}", visualize(&solution));
    }
    if config.output_json {
        println!("{}", serde_json::to_string_pretty(&solution.report())?);
    } else {
        println!("{}", solution_string(&solution));
    }

    Ok(())
}
