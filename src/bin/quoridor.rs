//! Command-line front end: self-play matches, transcript replay and
//! one-off engine queries.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quoridor_engine::codec;
use quoridor_engine::config::EngineConfig;
use quoridor_engine::controller::{
    play_match, EnginePlayer, Match, Player, RandomPlayer, Replay, SelfPlayConfig, Transcript,
};
use quoridor_engine::core::{Result, Side};
use quoridor_engine::search::{SearchConfig, Strategy};

/// Quoridor engine
#[derive(Parser, Debug)]
#[command(name = "quoridor")]
#[command(about = "Quoridor rules engine with alpha-beta and MCTS search", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML file with [game] and [search] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play engine-versus-engine matches
    Selfplay {
        /// Number of matches
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Mover for White
        #[arg(long, value_enum, default_value = "alpha-beta")]
        white: Mover,

        /// Mover for Black
        #[arg(long, value_enum, default_value = "mcts")]
        black: Mover,

        /// Abandon a match after this many plies
        #[arg(long, default_value = "300")]
        max_plies: usize,

        /// Seed for random movers
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Save each transcript in this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },

    /// Replay a saved transcript move by move
    Replay {
        /// Transcript file, one move code per line
        transcript: PathBuf,
    },

    /// Print the legal move codes after a transcript
    Legal {
        /// Transcript file; the opening position when omitted
        transcript: Option<PathBuf>,
    },

    /// Print the engine's move after a transcript
    Best {
        /// Transcript file; the opening position when omitted
        transcript: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mover {
    AlphaBeta,
    Mcts,
    Random,
}

fn mover(kind: Mover, search: &SearchConfig, seed: u64) -> Box<dyn Player> {
    match kind {
        Mover::AlphaBeta => Box::new(EnginePlayer::new(
            search.clone().with_strategy(Strategy::AlphaBeta),
        )),
        Mover::Mcts => Box::new(EnginePlayer::new(search.clone().with_strategy(Strategy::Mcts))),
        Mover::Random => Box::new(RandomPlayer::new(seed)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Selfplay {
            games,
            white,
            black,
            max_plies,
            seed,
            save_dir,
        } => run_selfplay(&config, games, white, black, max_plies, seed, save_dir),
        Command::Replay { transcript } => run_replay(&config, transcript),
        Command::Legal { transcript } => {
            let game = load_match(&config, transcript)?;
            let codes = codec::encode_all(&game.legal_moves());
            let text: Vec<String> = codes.iter().map(u8::to_string).collect();
            println!("{}", text.join(" "));
            Ok(())
        }
        Command::Best { transcript } => {
            let mut game = load_match(&config, transcript)?;
            let mv = game.play_engine_move(&config.search)?;
            println!("{} {}", codec::encode(mv), mv);
            Ok(())
        }
    }
}

fn load_match(config: &EngineConfig, transcript: Option<PathBuf>) -> Result<Match> {
    match transcript {
        Some(path) => {
            let transcript = Transcript::load(&path, config.game.board_size)?;
            Match::from_transcript(config.game.clone(), &transcript)
        }
        None => Match::new(config.game.clone()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_selfplay(
    config: &EngineConfig,
    games: u32,
    white: Mover,
    black: Mover,
    max_plies: usize,
    seed: u64,
    save_dir: Option<PathBuf>,
) -> Result<()> {
    let settings = SelfPlayConfig::default()
        .with_game(config.game.clone())
        .with_max_plies(max_plies);
    let mut wins = [0u32; 2];
    let mut abandoned = 0u32;

    for game in 0..games {
        let game_seed = seed.wrapping_add(2 * game as u64);
        let mut white_player = mover(white, &config.search, game_seed);
        let mut black_player = mover(black, &config.search, game_seed + 1);

        let outcome = play_match(&settings, white_player.as_mut(), black_player.as_mut())?;
        match outcome.winner {
            Some(side) => wins[side.index()] += 1,
            None => abandoned += 1,
        }
        println!(
            "game {}: {} after {} plies",
            game + 1,
            outcome
                .winner
                .map_or_else(|| "abandoned".to_string(), |side| format!("{} wins", side)),
            outcome.plies
        );

        if let Some(dir) = &save_dir {
            let path = outcome.transcript.save_in_dir(dir)?;
            println!("saved {}", path.display());
        }
    }

    info!(
        white_wins = wins[Side::White.index()],
        black_wins = wins[Side::Black.index()],
        abandoned,
        "self-play finished"
    );
    Ok(())
}

fn run_replay(config: &EngineConfig, path: PathBuf) -> Result<()> {
    let transcript = Transcript::load(&path, config.game.board_size)?;
    let mut replay = Replay::new(config.game.clone(), &transcript)?;

    println!("{}", replay.state());
    while let Some(record) = replay.step()? {
        println!("{}. {} {}", record.sequence + 1, record.side, record.mv);
        println!("{}", replay.state());
    }

    match replay.winner() {
        Some(side) => println!("{} wins", side),
        None => println!("no winner after {} moves", replay.position()),
    }
    if replay.remaining() > 0 {
        warn!(remaining = replay.remaining(), "moves recorded after the win were skipped");
    }
    Ok(())
}
