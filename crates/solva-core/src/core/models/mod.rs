//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent one
//! snapshot of a periodic molecular simulation, providing the foundation for all
//! shell-construction queries.
//!
//! ## Key Components
//!
//! - [`boundary`] - Orthorhombic periodic box and the minimum-image convention
//! - [`frame`] - Immutable coordinate snapshot with a periodic-aware spatial index
//! - [`group`] - Sets of particle indices drawn from one frame
//! - [`ids`] - Stable molecule identifiers
//! - [`molecule`] - Whole-molecule records
//! - [`particle`] - Individual particle records
//!
//! ## Usage
//!
//! Frames are constructed through [`frame::FrameBuilder`] and are read-only
//! afterwards; every engine query is a pure function over a built frame.
//!
//! ```ignore
//! use solva::core::models::{boundary::SimulationBox, frame::FrameBuilder, ids::MoleculeId};
//! use nalgebra::{Point3, Vector3};
//!
//! let boundary = SimulationBox::new(Vector3::new(10.0, 10.0, 10.0))?;
//! let mut builder = FrameBuilder::new(boundary);
//! builder.start_molecule(MoleculeId(1), "SOL");
//! builder.add_particle("OW", 15.999, Point3::new(1.0, 2.0, 3.0));
//! let frame = builder.build()?;
//! ```

pub mod boundary;
pub mod frame;
pub mod group;
pub mod ids;
pub mod molecule;
pub mod particle;
