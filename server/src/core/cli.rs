use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_AIR_QUALITY_DB, ENV_CONFIG, ENV_DARKSKY_DB, ENV_DEBUG, ENV_HOST, ENV_PORT, ENV_SOLAR_DB,
};

#[derive(Parser)]
#[command(name = "urbanhome")]
#[command(version, about = "Read-only API over home sensor readings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (logs every request and response at INFO)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Air quality SQLite database (table p_environ)
    #[arg(long, global = true, env = ENV_AIR_QUALITY_DB)]
    pub air_quality_db: Option<PathBuf>,

    /// Solar SQLite database (table sunpower)
    #[arg(long, global = true, env = ENV_SOLAR_DB)]
    pub solar_db: Option<PathBuf>,

    /// Dark Sky SQLite database (table darksky)
    #[arg(long, global = true, env = ENV_DARKSKY_DB)]
    pub darksky_db: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Load configuration and open every dataset, then exit
    Check,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub air_quality_db: Option<PathBuf>,
    pub solar_db: Option<PathBuf>,
    pub darksky_db: Option<PathBuf>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
            config: cli.config,
            air_quality_db: cli.air_quality_db,
            solar_db: cli.solar_db,
            darksky_db: cli.darksky_db,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}
