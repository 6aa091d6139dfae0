// src/data/record.rs

//! Implements a [`Record`], one parsed procmail delivery abstract.
//!
//! [`Record`]: crate::data::record::Record

use crate::common::FPath;

use std::fmt;

use ::lazy_static::lazy_static;
use ::phf::phf_map;
use ::regex::Regex;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// date grammar
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Month name to zero-based month ordinal, 0–11.
///
/// Incremented to 1–12 within [`Record::dt_canonical`].
///
/// [`Record::dt_canonical`]: self::Record#method.dt_canonical
pub static MONTH_ORDINAL: phf::Map<&'static str, u32> = phf_map! {
    "Jan" => 0,
    "Feb" => 1,
    "Mar" => 2,
    "Apr" => 3,
    "May" => 4,
    "Jun" => 5,
    "Jul" => 6,
    "Aug" => 7,
    "Sep" => 8,
    "Oct" => 9,
    "Nov" => 10,
    "Dec" => 11,
};

/// Regex pattern for the raw date text of a `From ` header line;
/// `<weekday> <month> <day> <hh:mm:ss> <ignored tokens...> <year>`.
///
/// Weekday and month names are closed 7-item and 12-item sets. The day is
/// space- or zero-padded. The year is the trailing 4-digit run; timezone or
/// locale tokens between the time and the year are skipped.
pub const DATE_PATTERN: &str = r"^(?P<weekday>Sun|Mon|Tue|Wed|Thu|Fri|Sat) (?P<month>Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) +(?P<day>\d{1,2}) (?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})\s+(?:.*\s)?(?P<year>\d{4})\s*$";

lazy_static! {
    /// Compiled [`DATE_PATTERN`]; compiled once per process.
    ///
    /// [`DATE_PATTERN`]: self::DATE_PATTERN
    pub static ref RE_DATE: Regex = Regex::new(DATE_PATTERN).unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One procmail delivery abstract: three loosely-structured log lines
/// (`From `, ` Subject:`, `  Folder:`) gathered into one value.
///
/// All fields begin unset and are populated incrementally by a
/// [`LogReader`] as lines are matched. A `Record` is _complete_ only once
/// `folder` is set; incomplete records are never surfaced to callers
/// (see [`is_complete`]).
///
/// No validation is performed on set. A malformed `date` is only caught
/// later by [`dt_canonical`], which fails closed (returns `None`).
///
/// [`LogReader`]: crate::readers::logreader::LogReader
/// [`is_complete`]: self::Record#method.is_complete
/// [`dt_canonical`]: self::Record#method.dt_canonical
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Sender address from the `From ` header line.
    from: Option<String>,
    /// Raw matched date text from the `From ` header line, verbatim.
    date: Option<String>,
    /// Text of the ` Subject:` line, verbatim.
    subject: Option<String>,
    /// Delivery destination from the `  Folder:` line.
    /// A `Record` is complete once this is set.
    folder: Option<String>,
    /// Message size in bytes from the `  Folder:` line.
    size: Option<u64>,
    /// Identifier of the originating log source; a file path, or the
    /// caller-supplied description of a handle-backed source.
    source: Option<FPath>,
}

impl Record {
    /// Create a new empty `Record`; all fields unset.
    pub fn new() -> Record {
        Record::default()
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn set_from(&mut self, from: &str) {
        self.from = Some(String::from(from));
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn set_date(&mut self, date: &str) {
        self.date = Some(String::from(date));
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.subject = Some(String::from(subject));
    }

    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    pub fn set_folder(&mut self, folder: &str) {
        self.folder = Some(String::from(folder));
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: &str) {
        self.source = Some(FPath::from(source));
    }

    /// A `Record` is complete only once `folder` is set.
    ///
    /// The `  Folder:` line terminates a delivery abstract, so a buffered
    /// `Record` without it is a truncated or interleaved fragment. Such
    /// fragments are discarded by the [`LogReader`], never surfaced.
    ///
    /// [`LogReader`]: crate::readers::logreader::LogReader
    pub fn is_complete(&self) -> bool {
        self.folder.is_some()
    }

    /// Derive the canonical timestamp, a normalized sortable
    /// `YYYYMMDDhhmmss` string, from the raw `date` text.
    ///
    /// Returns `None` if `date` is unset or does not match
    /// [`DATE_PATTERN`]; malformed dates fail closed, no error is raised.
    /// Re-deriving from an unchanged `Record` always yields the same
    /// string. There is intentionally no setter counterpart; the value is
    /// derived, never stored.
    ///
    /// [`DATE_PATTERN`]: self::DATE_PATTERN
    pub fn dt_canonical(&self) -> Option<String> {
        let date: &str = self.date.as_deref()?;
        let captures = RE_DATE.captures(date)?;
        let month0: &u32 = MONTH_ORDINAL.get(&captures["month"])?;
        // day may be "8", " 8", or "08"; parse discards the padding
        let day: u32 = captures["day"].parse::<u32>().ok()?;
        Some(format!(
            "{}{:02}{:02}{}{}{}",
            &captures["year"],
            month0 + 1,
            day,
            &captures["hour"],
            &captures["minute"],
            &captures["second"],
        ))
    }
}

impl fmt::Debug for Record {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Record")
            .field("from", &self.from)
            .field("date", &self.date)
            .field("subject", &self.subject)
            .field("folder", &self.folder)
            .field("size", &self.size)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "From {} {}; Subject: {}; Folder: {} ({} bytes)",
            self.from.as_deref().unwrap_or("?"),
            self.date.as_deref().unwrap_or("?"),
            self.subject.as_deref().unwrap_or("?"),
            self.folder.as_deref().unwrap_or("?"),
            self.size.map_or(String::from("?"), |sz| sz.to_string()),
        )
    }
}
