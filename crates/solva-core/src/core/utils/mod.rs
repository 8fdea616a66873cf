//! Pure utility tables for the core module.
//!
//! This module provides lookup helpers that support frame construction,
//! currently the static element mass table used to weight center-of-mass
//! computations.

pub mod masses;
