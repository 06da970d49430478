//! Beadview - dependency graph viewer for beads issue trackers.
//!
//! This crate provides both a CLI application and a library that loads
//! issues and sprints from a repository's `.beads/` directory, analyzes the
//! dependency graph between issues, and exports graph snapshots.
//!
//! Data flows through the modules in one direction:
//!
//! ```text
//! store -> [Issue] -> analysis::analyze -> Stats ─┐
//!                  -> hash::compute_data_hash ────┼-> export::save_graph_snapshot
//!                  ───────────────────────────────┘
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod hash;
pub mod store;

// Public CLI module (needed by binary)
pub mod app;
pub mod cli;
pub mod output;
