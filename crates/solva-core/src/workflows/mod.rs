//! # Workflows Module
//!
//! This module provides the high-level, user-facing entry points of Solva,
//! composing the shell engine over whole trajectories.
//!
//! ## Overview
//!
//! Workflows tie the `engine` and `core` layers together to execute a complete
//! analysis: for every frame of a trajectory, resolve the solute, build its
//! first solvation shell according to a configured criterion, summarize the
//! shell composition, and optionally classify the ion-pairing state. Frames
//! are independent snapshots, so the per-frame map parallelizes cleanly when
//! the `parallel` feature is enabled.
//!
//! ## Architecture
//!
//! - **Solvation Workflow** ([`solvate`]) - Per-frame first-shell analysis with
//!   composition counting, pairing classification, and flattened result records.

pub mod solvate;
