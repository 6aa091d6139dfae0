// src/data/mod.rs

//! The `data` module is specialized data containers for the
//! _procmail log reader_ library; currently only [`Record`].
//!
//! [`Record`]: crate::data::record::Record

pub mod record;
