//! # Core Module
//!
//! This module provides the fundamental building blocks for representing periodic
//! molecular simulation snapshots in Solva, serving as the foundation that the
//! shell-construction engine operates on.
//!
//! ## Overview
//!
//! The core module implements the essential data structures required to answer
//! periodic-aware geometric queries: an immutable coordinate snapshot with a
//! spatial index, an orthorhombic periodic box owning the minimum-image
//! convention, and whole-molecule bookkeeping.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Frames, boxes, particles,
//!   molecules, and particle groups
//! - **Pure Utilities** ([`utils`]) - The static element mass table used for
//!   center-of-mass weighting

pub mod models;
pub mod utils;
