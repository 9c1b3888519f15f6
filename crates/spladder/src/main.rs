//! Spladder CLI
//!
//! Register teams, schedule rounds, enter scores and publish rankings.

use anyhow::{bail, Context, Result};
use ladder_core::Score;
use spladder::{
    challenge_line, ranking_report, round_summary, JsonFileStore, Spladder, SpladderConfig,
    DEFAULT_CONFIG_PATH,
};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage() {
    println!("Spladder ladder runner");
    println!();
    println!("Usage:");
    println!("  spladder [--config FILE] register <team> <player>...");
    println!("  spladder [--config FILE] seed <team>...");
    println!("  spladder [--config FILE] add-team <rank> <team>");
    println!("  spladder [--config FILE] schedule");
    println!("  spladder [--config FILE] score <code> <challenger sets> <defender sets>");
    println!("  spladder [--config FILE] enter-scores");
    println!("  spladder [--config FILE] publish");
    println!("  spladder [--config FILE] show");
    println!();
    println!("Teams for `seed` are listed from rank 1 down.");
    println!("Config defaults to {} in the working directory.", DEFAULT_CONFIG_PATH);
}

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, what: &str) -> Result<T> {
    let arg = arg.with_context(|| format!("Missing {}", what))?;
    arg.parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}: {}", what, arg))
}

fn run(command: &str, args: &[String], app: &mut Spladder<JsonFileStore>) -> Result<()> {
    match command {
        "register" => {
            let Some((team, players)) = args.split_first() else {
                bail!("register requires a team name and its players");
            };
            app.register_team(team, players.to_vec())?;
            println!("Registered {} ({} players)", team, players.len());
        }
        "seed" => {
            let list = app.seed(args.to_vec())?;
            print!("{}", ranking_report(&list));
        }
        "add-team" => {
            let position = parse_number(args.first(), "rank")?;
            let team = args.get(1).context("Missing team name")?;
            app.add_team(position, team)?;
            println!("Added {} at rank {}", team, position);
        }
        "schedule" => {
            for challenge in app.schedule()? {
                println!("{}", challenge_line(app.name(), &challenge));
            }
        }
        "score" => {
            let code = parse_number(args.first(), "challenge code")?;
            let challenger = parse_number(args.get(1), "challenger sets")?;
            let defender = parse_number(args.get(2), "defender sets")?;
            let phase = app.record_score(code, Score::new(challenger, defender))?;
            println!("Recorded {}-{}, round is {}", challenger, defender, phase);
        }
        "enter-scores" => {
            let stdin = io::stdin();
            let recorded = app.enter_scores(stdin.lock(), io::stdout())?;
            println!("{} score(s) recorded", recorded);
        }
        "publish" => {
            let result = app.publish()?;
            print!("{}", round_summary(&result));
            print!("{}", ranking_report(&result.next));
        }
        "show" => print!("{}", app.overview()?),
        _ => {
            print_usage();
            bail!("Unknown command: {}", command);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spladder=info,ladder_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            bail!("--config requires a file");
        }
        config_path = PathBuf::from(args.remove(1));
        args.remove(0);
    }

    let Some((command, rest)) = args.split_first() else {
        print_usage();
        return Ok(());
    };
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    let config = SpladderConfig::load(&config_path)?;
    let store = JsonFileStore::new(&config.state_file);
    let mut app = Spladder::open(config, store)?;

    run(command, rest, &mut app)
}
