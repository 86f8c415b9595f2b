//! sorry-rs: a rule engine for the Sorry! board game
//!
//! Goals:
//! - Exact rules: movement, slides, bumps and every card's options
//! - Pure queries over a small `Copy` board state; nothing is mutated until a play commits
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: list and make a play
//! ```
//! use sorry_rs::board::Side;
//! use sorry_rs::game::Game;
//! use sorry_rs::rules::Rules;
//!
//! let mut game = Game::new(&[Side::Blue, Side::Red], Rules::default(), 42).unwrap();
//! let side = game.current();
//! let plays = game.legal_plays();
//! assert!(!plays.is_empty());
//! game.play(&plays[0]).unwrap();
//! assert_eq!(game.history_recent(1)[0].side, side);
//! ```
//!
//! ## Simulator
//! Play a seeded all-bot game from the command line with:
//! ```sh
//! cargo run --bin sorry-sim -- --seed 7 --sides BYGR
//! ```

pub mod agents;
pub mod board;
pub mod cards;
pub mod deck;
pub mod default_action;
pub mod engine;
pub mod enumerate;
pub mod game;
pub mod hand;
pub mod legality;
pub mod movement;
pub mod play;
pub mod rules;
pub mod state;

pub use default_action::resolve_default;
pub use enumerate::enumerate_plays;
pub use legality::is_legal;
pub use play::apply_play;
pub use state::check_win;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
