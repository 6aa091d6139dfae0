// src/lib.rs

//! _procmail log reader_ library.
//!
//! Parses procmail-style mail-delivery logs into [`Record`] delivery
//! abstracts using a [`LogReader`]. A `LogReader` reads an ordered queue of
//! log sources as if they were one continuous stream, and never closes the
//! final source, so lines appended later are picked up by a later call
//! ("tailing").
//!
//! [`Record`]: crate::data::record::Record
//! [`LogReader`]: crate::readers::logreader::LogReader

pub mod common;
pub mod data;
pub mod debug;
pub mod readers;
#[cfg(test)]
pub mod tests;
