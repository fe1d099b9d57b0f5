//! Kernel Layer
//!
//! Portable implementations of the AES round functions and the carry-less
//! multiply used by GHASH. No target-specific code lives here; the compiler
//! is left to schedule the unrolled GHASH lanes.

pub mod constants;
pub mod portable;
