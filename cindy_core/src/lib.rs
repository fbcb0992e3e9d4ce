#![forbid(unsafe_code)]

//! Core domain model and business logic for the Cindy rep tracker.
//!
//! This crate provides:
//! - Domain types (exercises, rep counters, workout state)
//! - Decrement engine with bonus-rep accrual
//! - Persistence (key-value store, session blobs)
//! - Pause/resume workout timer
//! - Controller with command handlers for any front end

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod storage;
pub mod session;
pub mod timer;
pub mod display;
pub mod controller;
pub mod asset_cache;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{apply_delta, decrement};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timer::WorkoutTimer;
pub use display::{format_time, RepsDisplay};
pub use controller::{WorkoutController, WorkoutView};
