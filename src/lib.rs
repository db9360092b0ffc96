//! Grid Snake - a tick-driven Snake game with persisted scores
//!
//! This library provides:
//! - Core game logic and the game loop session (game module)
//! - Score persistence behind a key-value interface (store module)
//! - A cancellable tick timer (schedule module)
//! - Terminal input mapping and rendering (input, render modules)
//! - The interactive keyboard session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod schedule;
pub mod store;
