//! Tick-driven simulation of the Pac-Man and Ms. Pac-Man arcade rules.
//!
//! A [`clock::GameClock`] drives a [`controller::GameController`], which runs one top-level phase at a
//! time against the shared [`game::GameModel`]. Presentation layers read the model and listen to
//! [`events::GameEvent`]s; nothing here draws, plays sounds or reads input.

pub mod actor;
pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod credit;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod timer;
