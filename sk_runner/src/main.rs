//! sokoban-check: can the boxes reach the goals?
//!
//! - `sokoban-check check <LEVELS>` compiles every board, runs the model
//!   checker and prints a summary table
//! - `sokoban-check compile <LEVELS>` prints the model of one board

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sk_domain::*;
use sk_formal::*;
use sk_model::*;
use sk_runner::*;

#[derive(Parser)]
#[command(name = "sokoban-check")]
#[command(about = "Sokoban solvability through a symbolic model checker", version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "sokoban-check.yaml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check boards with the model checker
    Check {
        /// Level file, boards separated by blank lines
        levels: PathBuf,

        /// Only this board (1-based)
        #[arg(long)]
        board: Option<usize>,

        /// Steps the bounded check explores
        #[arg(long)]
        bound: Option<u32>,

        /// Strategy to run, repeat for several (sat, bdd)
        #[arg(long = "strategy")]
        strategies: Vec<Strategy>,

        /// Model checker executable
        #[arg(long)]
        engine: Option<PathBuf>,

        /// Seconds before a run is abandoned
        #[arg(long)]
        timeout: Option<u64>,

        /// Directory for the model files
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also check each box on its own
        #[arg(long)]
        iterative: bool,

        /// Write a JSON report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the model of one board
    Compile {
        /// Level file, boards separated by blank lines
        levels: PathBuf,

        /// Which board (1-based)
        #[arg(long, default_value = "1")]
        board: usize,

        /// Only ask for this box to reach a goal
        #[arg(long = "box")]
        single_box: Option<usize>,

        /// Write the model here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Check {
            levels,
            board,
            bound,
            strategies,
            engine,
            timeout,
            out,
            iterative,
            report,
        } => {
            let mut config = CheckConfig::load_or_default(&cli.config)
                .with_context(|| format!("loading {}", cli.config.display()))?;
            if let Some(b) = bound {
                config.bound = b;
            }
            if !strategies.is_empty() {
                config.strategies = strategies;
            }
            if let Some(e) = engine {
                config.engine.executable = e;
            }
            if let Some(t) = timeout {
                config.engine.timeout_secs = t;
            }
            if let Some(o) = out {
                config.output_dir = o;
            }
            config.iterative |= iterative;
            config.validate()?;

            let boards = select(load(&levels)?, board)?;
            run_check(config, boards, report).await
        }
        Commands::Compile {
            levels,
            board,
            single_box,
            output,
        } => {
            let boards = select(load(&levels)?, Some(board))?;
            let target = match single_box {
                Some(k) => WinTarget::SingleBox(BoxId(k)),
                None => WinTarget::AllBoxes,
            };
            let model = compile_board(&boards[0].1, target)
                .with_context(|| format!("compiling board {board}"))?;
            match output {
                Some(path) => {
                    write_smv(&model, &path)?;
                    info!(path = %path.display(), "model written");
                }
                None => print!("{}", to_smv(&model)),
            }
            Ok(())
        }
    }
}

fn load(levels: &Path) -> Result<Vec<Board>> {
    load_boards(levels).with_context(|| format!("reading {}", levels.display()))
}

fn select(boards: Vec<Board>, which: Option<usize>) -> Result<Vec<(usize, Board)>> {
    let count = boards.len();
    let boards = numbered(boards);
    match which {
        None if count == 0 => bail!("no boards in the level file"),
        None => Ok(boards),
        Some(i) if i >= 1 && i <= count => Ok(boards.into_iter().filter(|(k, _)| *k == i).collect()),
        Some(i) => bail!("there is no board {i}, the file holds {count}"),
    }
}

async fn run_check(
    config: CheckConfig,
    boards: Vec<(usize, Board)>,
    report: Option<PathBuf>,
) -> Result<()> {
    let started = chrono::Utc::now();
    info!(
        boards = boards.len(),
        bound = config.bound,
        out = %config.output_dir.display(),
        "checking"
    );

    let engine = NuXmv::new(config.engine.clone());
    let batch = run_batch(&engine, &boards, &config).await;

    println!("\nSummary:");
    print!("{}", summary_table(&batch));
    for outcome in &batch.outcomes {
        if let BoardOutcome::Checked {
            iterative: Some(it),
            ..
        } = outcome
        {
            println!();
            print!("{}", iterative_summary(it));
        }
    }

    if let Some(path) = report {
        let run = RunReport {
            started,
            finished: chrono::Utc::now(),
            config,
            batch,
        };
        let json = serde_json::to_string_pretty(&run)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
