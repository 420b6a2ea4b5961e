//! treinofit - Weekly workout planner
//!
//! Workout catalog curated by an administrator, plus one weekly schedule per
//! signed-in user, both kept in a local key-value store.

pub mod admin;
pub mod app;
pub mod catalog;
pub mod db;
pub mod media;
pub mod nav;
pub mod plan;
pub mod session;
pub mod tui;
pub mod workouts;

pub use app::App;
pub use db::{Database, Storage};
