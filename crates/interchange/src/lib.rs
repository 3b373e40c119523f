//! osydata-interchange: Shared case-JSON contract types.
//!
//! Typed structs for the case bundle consumed by the downstream modeling
//! application: the `genData` set inventory plus the per-group parameter
//! record maps. The field vocabulary (`osy-tech`, `TechId`, `SC_0`, ...)
//! is dictated by that application's storage schema and is treated as a
//! fixed contract, not reinvented here.
//!
//! The conversion pipeline in osydata-core produces these types; any
//! consumer that reads case JSON back can deserialize into them.

pub mod types;

pub use types::*;
