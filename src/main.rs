use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drainage::{input, Config, Island};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "drainage")]
#[command(about = "Compute the water trapped on gridded islands")]
struct Cmd {
    /// Configuration file; defaults to the user configuration directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more detail to stderr; repeat for more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the trapped volume of each island, one per line
    Solve {
        /// Input file; reads stdin when absent or `-`
        input: Option<PathBuf>,
        /// Also print each island's terrain after it has been filled
        #[arg(long)]
        show_terrain: bool,
    },
    /// Write the default configuration file
    InitConfig,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cmd.action {
        Action::Solve {
            input,
            show_terrain,
        } => solve(cmd.config, input, show_terrain),
        Action::InitConfig => init_config(cmd.config),
    }
}

fn solve(config: Option<PathBuf>, source: Option<PathBuf>, show_terrain: bool) -> Result<()> {
    let config = Config::load_or_default(config.as_deref()).context("loading configuration")?;
    let options = config.drain_options();
    tracing::debug!(?options, "configured");

    let islands = match source {
        Some(path) if path.as_os_str() != "-" => {
            input::parse(&path).with_context(|| format!("parsing {}", path.display()))?
        }
        _ => input::parse_reader(io::stdin().lock(), "<stdin>")
            .context("parsing stdin")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (idx, terrain) in islands.into_iter().enumerate() {
        let mut island = Island::from(terrain);
        let drainage = island
            .drain(options)
            .with_context(|| format!("draining island {}", idx + 1))?;
        writeln!(out, "{}", drainage.volume)?;
        if show_terrain {
            write!(out, "{}", island.terrain())?;
        }
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let config = Config::default();
    let path = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };
    tracing::info!(path = %path.display(), "wrote default configuration");
    println!("{}", path.display());
    Ok(())
}
