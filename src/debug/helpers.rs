// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;

use std::fs::OpenOptions;
#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

extern crate tempfile;
#[doc(hidden)]
pub use tempfile::{Builder, NamedTempFile};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-procmail-log-reader-test-";

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Testing helper function to write a `str` to a temporary file.
///
/// BUG: `NamedTempFile` created within `lazy_static` will fail to remove
///      itself <https://github.com/Stebalien/tempfile/issues/183>.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match Builder::new()
        .prefix(STR_TEMPFILE_PREFIX)
        .suffix(".log")
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Testing helper function to append a `str` to an existing file.
///
/// Exercises tailing; lines appended after a reader previously reached
/// end-of-data.
pub fn append_to_file(
    path: &FPath,
    data: &str,
) {
    let mut file = match OpenOptions::new()
        .append(true)
        .open(path)
    {
        Ok(val) => val,
        Err(err) => {
            panic!("OpenOptions::open({:?}) return Err {}", path, err);
        }
    };
    match file.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("File::write_all() return Err {}", err);
        }
    }
}
