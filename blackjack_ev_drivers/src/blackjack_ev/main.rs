use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use blackjack_ev::{Evaluation, InitialSituation, SimulationConfig};
use blackjack_ev_drivers::{parse_config_from_file, Config};
use clap::{Parser, ValueEnum};

const DEFAULT_CONFIG_FILE: &str = ".blackjack_ev.yml";

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Estimates the EV of standing, hitting, splitting and doubling a blackjack hand.
#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// Your hand, e.g. "A 8"
    #[arg(short = 'p', long)]
    hand: String,

    /// The dealer's up card, e.g. "10"
    #[arg(short, long)]
    dealer: String,

    /// The path of the config file [default: ~/.blackjack_ev.yml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of decks in the shoe
    #[arg(long)]
    decks: Option<u8>,

    /// Number of simulated trials per action
    #[arg(short, long)]
    trials: Option<u64>,

    /// Number of worker threads, 0 for one per core
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop simulating after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CommandLineArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(decks) = args.decks {
        config.rule.number_of_decks = decks;
    }
    if let Some(trials) = args.trials {
        config.simulator.trials_per_action = trials;
    }
    if let Some(threads) = args.threads {
        config.simulator.number_of_threads = threads;
    }
    if args.seed.is_some() {
        config.simulator.seed = args.seed;
    }
    if args.time_limit_ms.is_some() {
        config.simulator.time_limit_ms = args.time_limit_ms;
    }
    let simulation_config: SimulationConfig = config.try_into()?;

    let hand: Vec<&str> = args.hand.split_whitespace().collect();
    let situation = InitialSituation::from_notation(&hand, &args.dealer)?;
    let evaluation = blackjack_ev::evaluate(&situation, &simulation_config)?;

    match args.format {
        OutputFormat::Text => print_text(
            &mut std::io::stdout().lock(),
            &situation,
            &evaluation,
            simulation_config.trials_per_action,
        )?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&evaluation)?),
    }
    Ok(())
}

/// An explicitly given config file must exist. The default one in the home directory is
/// optional.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => parse_config_from_file(path),
        None => {
            let home_dir = home::home_dir().context("Cannot find home directory")?;
            load_default_config(&home_dir.join(DEFAULT_CONFIG_FILE))
        }
    }
}

fn load_default_config(default_path: &Path) -> anyhow::Result<Config> {
    if default_path.is_file() {
        parse_config_from_file(default_path)
    } else {
        log::info!(
            "No config file at {}, using defaults",
            default_path.display()
        );
        Ok(Config::default())
    }
}

fn print_text<W: Write>(
    out: &mut W,
    situation: &InitialSituation,
    evaluation: &Evaluation,
    trials_per_action: u64,
) -> std::io::Result<()> {
    writeln!(out, "Results for {}", situation)?;
    for (action, summary) in &evaluation.results {
        writeln!(out, "{}:", capitalize(&action.to_string()))?;
        writeln!(out, "- EV: {:.2}", summary.ev)?;
        writeln!(out, "- Win Probability: {:.2}%", summary.win * 100.0)?;
        writeln!(out, "- Lose Probability: {:.2}%", summary.lose * 100.0)?;
        writeln!(out, "- Push Probability: {:.2}%", summary.push * 100.0)?;
    }
    writeln!(
        out,
        "({} trials per action, seed {})",
        trials_per_action, evaluation.seed
    )?;
    for (action, summary) in &evaluation.results {
        if summary.trials < trials_per_action {
            writeln!(
                out,
                "Time limit reached: {} ran only {} trials",
                action, summary.trials
            )?;
        }
    }
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
