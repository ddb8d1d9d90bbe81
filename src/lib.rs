//! cppreflect - annotation-driven C++ reflection model extraction
//!
//! cppreflect reads C++ declarations from a front end, keeps the ones marked
//! for reflection (`@runtime` doc tags or registration attributes), and builds
//! a registry of types with their fields, methods, parents and enum values.
//! Cross references between types are resolved after every input is merged.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (front end boundary, extractors, registry, orchestrator)
//! - `issues`: Issue type definitions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
