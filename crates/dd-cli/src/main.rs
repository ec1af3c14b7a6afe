//! dungeon-duel
//!
//! Main entry point for the game.

mod autopilot;
mod console;
mod narrate;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dd_core::{Dungeon, DungeonReport, GameRng, PlayerClass, Role};

use autopilot::Autopilot;
use console::Console;

/// Mixed into the run seed to seed the autopilot's RNG.
const AUTOPILOT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Turn-based dungeon combat in the terminal
#[derive(Parser, Debug)]
#[command(name = "dungeon-duel")]
#[command(author, version, about = "Fight your way through the dungeon!", long_about = None)]
struct Args {
    /// Character name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Class (Knight or Mage)
    #[arg(short = 'p', long = "class")]
    class: Option<Role>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer pick the player's abilities
    #[arg(long)]
    auto: bool,

    /// Stop after this many battles
    #[arg(long = "battles")]
    max_battles: Option<u32>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Suppress battle narration (autopilot only)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!(seed = rng.seed(), "starting run");

    let mut dungeon = match args.max_battles {
        Some(max) => Dungeon::with_max_battles(max),
        None => Dungeon::new(),
    };

    let report = if args.auto {
        let role = args.class.unwrap_or_default();
        let name = args.name.clone().unwrap_or_else(|| role.to_string());
        let mut player = PlayerClass::new(role, name);
        let output = (!args.quiet).then(io::stdout);
        let mut pilot = Autopilot::new(GameRng::new(rng.seed() ^ AUTOPILOT_SEED_SALT), output);
        dungeon
            .run(&mut player, &mut pilot, &mut rng)
            .context("autopilot run failed")?
    } else {
        let mut console = Console::new(io::stdin().lock(), io::stdout());
        let Some(mut player) = create_player(&mut console, &args)? else {
            return Ok(());
        };
        let report = dungeon
            .run(&mut player, &mut console, &mut rng)
            .context("dungeon run failed")?;
        if let Some(err) = console.take_error() {
            return Err(err).context("reading from console");
        }
        report
    };

    print_summary(&report, args.json)
}

/// Build the player from flags, prompting for whatever was not given.
///
/// Returns `None` if input ends before a character is complete.
fn create_player<R: io::BufRead, W: io::Write>(
    console: &mut Console<R, W>,
    args: &Args,
) -> Result<Option<PlayerClass>> {
    let role = match args.class {
        Some(role) => role,
        None => match console.choose_role().context("reading class")? {
            Some(role) => role,
            None => return Ok(None),
        },
    };
    let name = match &args.name {
        Some(name) => name.clone(),
        None => match console.choose_name().context("reading name")? {
            Some(name) => name,
            None => return Ok(None),
        },
    };
    Ok(Some(PlayerClass::new(role, name)))
}

fn print_summary(report: &DungeonReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("serializing report")?;
        println!("{text}");
    } else {
        info!(wins = report.wins, battles = report.battles, "run finished");
    }
    Ok(())
}
