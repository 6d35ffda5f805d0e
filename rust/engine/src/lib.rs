//! # headsup-engine: Heads-up Betting Engine
//!
//! A deterministic two-seat no-limit hold'em engine built to feed a learning
//! agent. Requested actions are never rejected: anything illegal or
//! unaffordable is degraded to the nearest legal action, and every step
//! reports a reward for the acting seat.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Card sources: seeded ChaCha20 deck and a stacked deck for tests
//! - [`hand`] - Hand evaluation and the pluggable [`hand::HandEvaluator`]
//! - [`player`] - Per-seat chips, cards and betting flags
//! - [`actions`] - Action space, degradation chain and application
//! - [`rules`] - Legal action sets
//! - [`game`] - Pot, board and street progression
//! - [`engine`] - Turn order, all-in run-out, showdown and rewards
//! - [`observation`] - Per-seat view of the table
//! - [`config`] - Stack and blind parameters
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_engine::actions::Action;
//! use headsup_engine::engine::{Engine, Seat};
//!
//! let mut engine = Engine::with_seed(42).unwrap();
//! let obs = engine.observe(Seat::Player);
//! assert_eq!(obs.community_cards.len(), 0);
//!
//! // checking from the small blind is degraded to a call
//! let outcome = engine.execute_action(Seat::Player, Action::Check).unwrap();
//! assert_eq!(outcome.label, "CALL");
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Stack splits and shuffles derive from the seed, so two engines built from
//! the same seed play out identically:
//!
//! ```rust
//! use headsup_engine::engine::{Engine, Seat};
//!
//! let a = Engine::with_seed(7).unwrap();
//! let b = Engine::with_seed(7).unwrap();
//! assert_eq!(a.observe(Seat::Player), b.observe(Seat::Player));
//! ```

pub mod actions;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod observation;
pub mod player;
pub mod rules;
