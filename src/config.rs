use crate::algorithm::VisitedPolicy;
use crate::solver::Strategy;

use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(
    name = "Matrix Rescue",
    about = "Grid-world hostage rescue solved with classic search strategies.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Grid string to solve", allow_hyphen_values = true)]
    pub grid: Option<String>,

    #[arg(long, help = "Path to a file holding the grid string")]
    pub grid_path: Option<String>,

    #[arg(long, help = "Solve a randomly generated grid", default_value_t = false)]
    pub generate: bool,

    #[arg(long, help = "Seed for grid generation")]
    pub seed: Option<u64>,

    #[arg(long, help = "Search strategy: BF, DF, ID, UC, GR1, GR2, AS1 or AS2")]
    pub strategy: Option<String>,

    #[arg(long, help = "Print the grid after every step of the plan", default_value_t = false)]
    pub visualize: bool,

    #[arg(long, help = "Depth cap for iterative deepening")]
    pub max_depth: Option<usize>,

    #[arg(long, value_enum, help = "When states enter the visited set")]
    pub visited_policy: Option<VisitedPolicy>,

    #[arg(long, help = "Print the result as JSON", default_value_t = false)]
    pub output_json: bool,

    #[arg(long, help = "Log level, overridden by RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: Option<String>,
    pub grid_path: Option<String>,
    pub generate: bool,
    pub seed: u64,
    pub strategy: String,
    pub visualize: bool,
    pub max_depth: usize,
    pub visited_policy: VisitedPolicy,
    pub output_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid: None,
            grid_path: None,
            generate: false,
            seed: 0,
            strategy: "BF".to_string(),
            visualize: false,
            max_depth: 1000,
            visited_policy: VisitedPolicy::Generation,
            output_json: false,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML config")
    }

    /// Command-line values win over the config file. A grid source given on
    /// the command line replaces any source from the file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if cli.grid.is_some() || cli.grid_path.is_some() || cli.generate {
            self.grid = cli.grid.clone();
            self.grid_path = cli.grid_path.clone();
            self.generate = cli.generate;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(strategy) = &cli.strategy {
            self.strategy = strategy.clone();
        }
        if let Some(max_depth) = cli.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(policy) = cli.visited_policy {
            self.visited_policy = policy;
        }
        self.visualize |= cli.visualize;
        self.output_json |= cli.output_json;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.strategy()?;

        let sources = [self.grid.is_some(), self.grid_path.is_some(), self.generate]
            .into_iter()
            .filter(|&given| given)
            .count();
        if sources != 1 {
            return Err(anyhow!(
                "Exactly one of grid, grid_path or generate must be set, got {}",
                sources
            ));
        }

        if self.max_depth == 0 {
            return Err(anyhow!("Max depth must be greater than 0"));
        }
        Ok(())
    }

    pub fn strategy(&self) -> anyhow::Result<Strategy> {
        Ok(self.strategy.parse()?)
    }
}
