// src/tests/mod.rs

//! Tests for _procmail_log_reader_.
//!
//! Tests are placed at `src/tests/`, inside the library, so they may
//! exercise private internals as well as the public API.

pub mod record_tests;
