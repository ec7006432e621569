//! CLI infrastructure for the oxo engine
//!
//! This module provides the command-line interface for playing against
//! the AI, analyzing positions, and sweeping the game tree.

pub mod commands;
pub mod output;
