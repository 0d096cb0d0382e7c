//! Terminal table for War.
//!
//! Seats the requested players, deals, and auto-plays every seat until the
//! game ends, printing each round.
//!
//! Built only with the `cli` feature: `cargo run --features cli --bin war`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use war_engine::core::config::DEFAULT_MAX_ROUNDS;
use war_engine::game::{parse_player_count, Game, PlayerSetup, SetupRequest};
use war_engine::{GameConfig, GameResult, RoundReport, WarError};

/// Play War in the terminal.
#[derive(Debug, Parser)]
#[command(name = "war", version, about = "The card game War for 2 to 13 players")]
struct Cli {
    /// Number of players (2 to 13).
    #[arg(short, long, value_name = "COUNT", default_value = "2")]
    players: String,

    /// Player names in seat order. Missing names become "Player N".
    #[arg(short, long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Seats (1-based) played by a person. Auto-played here all the same.
    #[arg(long, value_name = "SEAT")]
    human: Vec<usize>,

    /// RNG seed for a reproducible game.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Cap on the number of rounds.
    #[arg(long, value_name = "ROUNDS", default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: u64,

    /// Most cards a war asks of each tied player.
    #[arg(long, value_name = "CARDS")]
    war_cards: Option<usize>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,

    /// Only print the final result.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn setup(cli: &Cli) -> Result<SetupRequest, WarError> {
    let count = parse_player_count(&cli.players)?;
    let request = (0..count).fold(SetupRequest::new(), |request, seat| {
        let name = cli.names.get(seat).cloned().unwrap_or_default();
        request.with_player(PlayerSetup::new(name).with_human(cli.human.contains(&(seat + 1))))
    });
    request.validate()?;
    Ok(request)
}

fn describe(game: &Game, report: &RoundReport) -> String {
    let name = |id: war_engine::PlayerId| game.players()[id.index()].name().to_string();

    let mut line = format!("Round {:>5}: ", report.round);
    for (i, step) in report.steps.iter().enumerate() {
        if i > 0 {
            line.push_str(" | WAR ");
        }
        let plays: Vec<String> = step.plays.iter().map(|(p, c)| format!("{} {}", name(*p), c.face())).collect();
        line.push_str(&plays.join(", "));
    }

    match report.winner {
        Some(winner) => line.push_str(&format!(" -> {} takes {}", name(winner), report.spoils)),
        None => line.push_str(" -> spoils returned"),
    }
    for out in &report.eliminated {
        line.push_str(&format!("\n             {} is out", name(*out)));
    }
    line
}

fn run(cli: &Cli) -> Result<(), WarError> {
    let request = setup(cli)?;

    let mut config = GameConfig::default().with_max_rounds(cli.max_rounds);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(war_cards) = cli.war_cards {
        config = config.with_war_cards(war_cards);
    }

    let mut game = Game::new(&request, config)?;
    game.start()?;
    println!("Seed {}: dealt {} cards to {} players", game.seed(), game.dealt_cards(), game.players().len());

    while game.result().is_none() && game.round() <= game.config().max_rounds {
        let report = game.play_round()?;
        if !cli.quiet {
            println!("{}", describe(&game, &report));
        }
    }

    match game.result() {
        Some(GameResult::Winner(winner)) => {
            let winner = game.player(winner)?;
            println!("{} wins after {} rounds", winner.name(), game.round());
        }
        Some(GameResult::Draw) => println!("Draw after {} rounds: nobody has cards left", game.round()),
        None => println!("No winner after {} rounds", game.config().max_rounds),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
