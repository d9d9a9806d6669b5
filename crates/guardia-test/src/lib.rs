//! Shared test fixtures for Guardia crates.
//!
//! This crate only depends on `guardia-core`, so any crate can take it as a
//! dev-dependency without a cycle.
//!
//! - [`calendar`] - periods and month calendars
//! - [`roster`] - doctors and quotas
//! - [`solution`] - hand-built [`ScheduleSolution`]s
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! guardia-test = { workspace = true }
//! ```
//!
//! [`ScheduleSolution`]: guardia_core::ScheduleSolution

pub mod calendar;
pub mod roster;
pub mod solution;

pub use calendar::{date, january_2026, weekday_calendar};
pub use roster::{doctor, quota_doctors, uniform_roster};
pub use solution::SolutionBuilder;
