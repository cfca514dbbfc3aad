//! Depviz - a dependency graph visualizer for Alpine packages.
//!
//! This crate provides both a CLI application and a library for discovering
//! the depth-limited dependency graph of a package, finding its reverse
//! dependencies and cycles, and rendering the result as a PlantUML diagram
//! and an ASCII tree.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod error;
pub mod graph;
pub mod provider;

// Public CLI module (needed by binary)
pub mod cli;

// Rendering
pub mod output;

pub use error::{Error, Result};
