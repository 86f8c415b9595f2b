//! Headless self-play: seat a bot on every side and play one seeded game.
//!
//! Run with: `cargo run --bin sorry-sim -- --seed 7 --sides BR --fast-start`

use sorry_rs::agents::{AgentTable, BotAgent};
use sorry_rs::board::Side;
use sorry_rs::game::Game;
use sorry_rs::rules::Rules;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "Usage: sorry-sim [--seed N] [--sides BYGR] [--teams] [--split-sevens] \
[--draw-after-two] [--force-play-after-two] [--hand-size N] [--fast-start] [--max-plays N]";

struct Options {
    seed: u64,
    sides: Vec<Side>,
    rules: Rules,
    max_plays: usize,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options { seed: 0, sides: Side::ALL.to_vec(), rules: Rules::default(), max_plays: 20_000 };
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().cloned().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--seed" => opts.seed = value("--seed")?.parse().map_err(|e| format!("bad seed: {e}"))?,
            "--sides" => {
                opts.sides = value("--sides")?
                    .chars()
                    .map(|c| Side::try_from(c).map_err(|e| e.to_string()))
                    .collect::<Result<_, _>>()?;
            }
            "--hand-size" => {
                let n = value("--hand-size")?.parse().map_err(|e| format!("bad hand size: {e}"))?;
                opts.rules = opts.rules.with_hand_size(n);
            }
            "--max-plays" => {
                opts.max_plays = value("--max-plays")?.parse().map_err(|e| format!("bad play cap: {e}"))?;
            }
            "--teams" => opts.rules = opts.rules.with_teams(true),
            "--split-sevens" => opts.rules = opts.rules.with_seven_split_any(true),
            "--draw-after-two" => opts.rules = opts.rules.with_draw_after_two(true),
            "--force-play-after-two" => opts.rules = opts.rules.with_force_play_after_two(true),
            "--fast-start" => opts.rules = opts.rules.with_fast_start(true),
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(opts)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sorry_rs=info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let mut game = match Game::new(&opts.sides, opts.rules, opts.seed) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Cannot set up the game: {e}");
            std::process::exit(2);
        }
    };
    let mut table = AgentTable::new();
    for (i, side) in opts.sides.iter().enumerate() {
        table.set_agent(*side, Some(Box::new(BotAgent::random(opts.seed.wrapping_add(i as u64 + 1)))));
    }

    tracing::info!(seed = opts.seed, version = sorry_rs::VERSION, "self-play starting");
    let plays = match table.run(&mut game, opts.max_plays) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Bot made an illegal play: {e}");
            std::process::exit(1);
        }
    };

    if game.is_over() {
        let names: Vec<&str> = game.winners().iter().map(|s| s.name()).collect();
        println!("{} won after {} turns ({plays} plays)", names.join(" and "), game.turn());
    } else {
        println!("no winner after {plays} plays");
    }
    for side in game.state().sides() {
        println!("{:<6} home: {}", side.name(), game.state().home_count(side));
    }
}
