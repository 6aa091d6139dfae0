// src/debug/mod.rs

//! The `debug` module is diagnostic printing macros and helper functions
//! for test builds.

pub mod helpers;
pub mod printers;
