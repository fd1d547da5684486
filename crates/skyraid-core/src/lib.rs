//! Core types and definitions for the skyraid simulation.
//!
//! This crate defines the vocabulary shared between the simulation and
//! its host: categories, geometry, kind enums, data tables, configuration,
//! audio events, and the resource and render interfaces the host
//! implements. It has no dependency on the ECS or on any windowing layer.

pub mod category;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod render;
pub mod resources;
pub mod tables;
pub mod types;

#[cfg(test)]
mod tests;
