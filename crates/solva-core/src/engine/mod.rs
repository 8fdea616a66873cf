//! # Engine Module
//!
//! This module implements the shell-construction and nearest-neighbor geometry
//! engine of Solva: given a central species, an immutable coordinate frame with
//! periodic boundary conditions, and a distance criterion, it determines which
//! whole molecules belong to a solvation shell, assigns per-molecule minimum
//! distances, orders them deterministically, and can recurse to build multiple
//! concentric shells.
//!
//! ## Architecture
//!
//! - **Species Resolution** ([`selection`]) - Normalizes polymorphic user
//!   references into canonical particle groups
//! - **Shell Queries** ([`shells`]) - Radial shells, adaptive closest-n
//!   searches, and breadth-first concentric expansion
//! - **Configuration** ([`config`]) - Adaptive search parameters with explicit
//!   termination guards
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//!   for long trajectory workflows
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Every operation here is a pure, reentrant function of its inputs; frames are
//! read-only and no state is carried between calls.

pub mod config;
pub mod error;
pub mod progress;
pub mod selection;
pub mod shells;
