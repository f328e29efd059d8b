//! FAC: Fibre Angle Calculator
//!
//! Explore how filament-winding process parameters (horn gear count, mandrel
//! diameter, horn gear speed) shape the fibre angle over a mandrel velocity
//! sweep, and find the velocity that yields a target angle.

pub mod cli;
pub mod core;
pub mod yaml;
