// src/readers/mod.rs

//! "Readers" for the _procmail log reader_ library.
//!
//! [`LogReader`] drives the record-assembly state machine over an ordered
//! queue of [`LogSource`]s.
//!
//! [`LogReader`]: crate::readers::logreader::LogReader
//! [`LogSource`]: crate::readers::logreader::LogSource

pub mod logreader;
