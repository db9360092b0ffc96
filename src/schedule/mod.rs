//! Timing for the game loop, kept apart from the game rules

pub mod timer;

pub use timer::TickTimer;
