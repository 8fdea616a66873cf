//! # Solva Core Library
//!
//! A library for identifying and characterizing solvation shells — the sets of
//! whole molecules spatially near a designated central species — in periodic
//! molecular simulation snapshots.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Frame`,
//!   `SimulationBox`, `ParticleGroup`) and pure utilities such as the element
//!   mass table. The minimum-image convention lives here and is shared by every
//!   distance computation in the library.
//!
//! - **[`engine`]: The Logic Core.** Implements the shell-construction geometry:
//!   species resolution, radial shell queries, adaptive closest-n searches, and
//!   breadth-first concentric shell expansion. All engine operations are pure
//!   functions over an immutable `Frame`.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It composes the engine over a sequence of frames to execute complete analyses,
//!   such as per-frame first-shell characterization with ion-pairing classification.

pub mod core;
pub mod engine;
pub mod workflows;
