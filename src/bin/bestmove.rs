use std::env;

use pesto_search::{Engine, EngineConfig, Position};

const DEFAULT_REMAINING_MS: u64 = 60_000;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        eprintln!("usage: bestmove <fen|startpos> [remaining_ms]");
        return;
    }

    let position = if args[1] == "startpos" {
        Ok(Position::new())
    } else {
        Position::from_fen(&args[1])
    };
    let mut position = match position {
        Ok(position) => position,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let remaining_ms = match args.get(2).map(|s| s.parse::<u64>()) {
        None => DEFAULT_REMAINING_MS,
        Some(Ok(ms)) => ms,
        Some(Err(err)) => {
            eprintln!("invalid remaining time '{}': {err}", args[2]);
            std::process::exit(1);
        }
    };

    let mut engine = Engine::new(EngineConfig::default());
    match engine.think(&mut position, remaining_ms) {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
}
