// src/readers/logreader.rs

//! Implements a [`LogReader`],
//! the driver of deriving [`Record`s] from a queue of [`LogSource`]s.
//!
//! A procmail delivery abstract is three loosely-structured physical lines:
//!
//! ```text
//! From god@heaven.af.mil Fri Feb  8 20:37:24 2002
//!  Subject: let there be light
//!   Folder: /var/mail/lkml                                            2345
//! ```
//!
//! The `LogReader` groups such lines into [`Record`]s, tolerating
//! interleaved informational or error lines between them. Lines matching no
//! recognized pattern are dropped, or surfaced verbatim when _error mode_
//! is enabled. A buffered record that never receives its `  Folder:` line
//! is discarded, never surfaced; procmail logs are conventionally treated
//! with this tolerance (a log cut mid-write loses that one entry).
//!
//! Sources are opened lazily in queue order and read as one continuous
//! stream. The final source is never closed, so a later call to
//! [`next`] picks up lines appended after end-of-data was reached
//! ("tailing"). Callers supporting log rotation push newly rotated files
//! with [`push_sources`] at any time.
//!
//! No errors propagate out of parsing. A source that cannot be opened or
//! read is reported via [`e_err!`] and treated as empty.
//!
//! [`Record`s]: crate::data::record::Record
//! [`Record`]: crate::data::record::Record
//! [`LogSource`]: crate::readers::logreader::LogSource
//! [`next`]: crate::readers::logreader::LogReader#method.next
//! [`push_sources`]: crate::readers::logreader::LogReader#method.push_sources
//! [`e_err!`]: crate::e_err

use crate::common::{FPath, ResultNext};
use crate::data::record::Record;
use crate::debug::printers::e_err;

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ::lazy_static::lazy_static;
use ::more_asserts::debug_assert_le;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// line grammar
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Regex pattern for the `From ` header line that starts a record;
/// captures the sender address and the raw date text.
///
/// The date grammar proper is [`DATE_PATTERN`].
///
/// [`DATE_PATTERN`]: crate::data::record::DATE_PATTERN
pub const FROM_PATTERN: &str = r"^From (?P<from>\S+) +(?P<date>(?:Sun|Mon|Tue|Wed|Thu|Fri|Sat) (?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) +\d{1,2} \d{2}:\d{2}:\d{2}.*\d{4})\s*$";

/// Regex pattern for the ` Subject:` line; exactly one leading space,
/// case-insensitive keyword, rest of line verbatim.
pub const SUBJECT_PATTERN: &str = r"(?i)^ Subject: ?(?P<subject>.*)$";

/// Regex pattern for the `  Folder:` line that completes a record; exactly
/// two leading spaces, a non-greedy path, then a whitespace-padded decimal
/// byte count anchored at end of line.
pub const FOLDER_PATTERN: &str = r"^  Folder: (?P<folder>.+?)\s+(?P<size>\d+)$";

lazy_static! {
    static ref RE_FROM: Regex = Regex::new(FROM_PATTERN).unwrap();
    static ref RE_SUBJECT: Regex = Regex::new(SUBJECT_PATTERN).unwrap();
    static ref RE_FOLDER: Regex = Regex::new(FOLDER_PATTERN).unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogSource
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One not-yet-opened input for a [`LogReader`]: a file system path opened
/// lazily, or an already-open line-readable handle.
///
/// The reader depends only on this type; the two variants are selected at
/// construction time.
///
/// [`LogReader`]: self::LogReader
pub enum LogSource {
    /// A file system path; opened with `File::open` when the reader
    /// reaches it in the queue. The path is the source identifier.
    Path(FPath),
    /// An already-open handle and its caller-supplied description, which
    /// serves as the source identifier (a raw reader has no inherent name).
    Handle(FPath, Box<dyn BufRead>),
}

impl LogSource {
    /// A `LogSource` opened lazily from a file system path.
    pub fn from_path(path: &FPath) -> LogSource {
        LogSource::Path(path.clone())
    }

    /// A `LogSource` wrapping an already-open line-readable handle.
    /// `description` becomes the identifier stamped onto records read from
    /// this source.
    pub fn from_handle<R>(
        description: &str,
        reader: R,
    ) -> LogSource
    where
        R: BufRead + 'static,
    {
        LogSource::Handle(FPath::from(description), Box::new(reader))
    }

    /// The identifier this source will carry once opened.
    pub fn id(&self) -> &FPath {
        match self {
            LogSource::Path(path) => path,
            LogSource::Handle(description, _) => description,
        }
    }
}

impl fmt::Debug for LogSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            LogSource::Path(path) => f.debug_tuple("LogSource::Path").field(path).finish(),
            LogSource::Handle(description, _) => f
                .debug_tuple("LogSource::Handle")
                .field(description)
                .finish(),
        }
    }
}

impl From<&str> for LogSource {
    fn from(path: &str) -> LogSource {
        LogSource::Path(FPath::from(path))
    }
}

impl From<String> for LogSource {
    fn from(path: String) -> LogSource {
        LogSource::Path(path)
    }
}

impl From<&Path> for LogSource {
    fn from(path: &Path) -> LogSource {
        LogSource::Path(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for LogSource {
    fn from(path: PathBuf) -> LogSource {
        LogSource::Path(path.to_string_lossy().into_owned())
    }
}

/// A [`LogSource`] after opening; the active source of a [`LogReader`].
///
/// [`LogSource`]: self::LogSource
/// [`LogReader`]: self::LogReader
struct OpenedSource {
    /// Source identifier; stamped onto completed records.
    id: FPath,
    /// The line reader. Dropped only when rolling over to a next source,
    /// never for the final source in the queue.
    reader: Box<dyn BufRead>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`LogReader::next`] result.
///
/// [`LogReader::next`]: self::LogReader#method.next
pub type ResultNextRecord = ResultNext<Record>;

/// Result of one inner read pass over the active source.
enum ReadLines {
    /// A record left the assembly buffer; completeness is rechecked by the
    /// caller before it is surfaced.
    Dequeued(Record),
    /// An unrecognized line to surface (error mode only), trimmed.
    Raw(String),
    /// End of the active source with nothing produced.
    Eof,
}

/// A pull-based reader deriving [`Record`]s from an ordered queue of
/// [`LogSource`]s.
///
/// Single-threaded and synchronous; state is mutated in place with no
/// locking, so one instance must not be shared across threads without
/// external serialization. Independent instances share nothing.
///
/// [`Record`]: crate::data::record::Record
/// [`LogSource`]: self::LogSource
pub struct LogReader {
    /// Ordered queue of not-yet-opened sources.
    pending: VecDeque<LogSource>,
    /// Currently open source, or `None` before the first open and after a
    /// rollover.
    active: Option<OpenedSource>,
    /// Record-assembly buffer; at most one record is in assembly at a
    /// time. The buffer lets the state machine look one line ahead (the
    /// next `From ` header) before deciding the in-assembly record is
    /// over. It persists across source rollover and across calls, so a
    /// truncated final record can still be completed by lines appended
    /// later (tailing).
    buffer: Vec<Record>,
    /// When enabled, unrecognized lines are surfaced as
    /// [`ResultNext::FoundRaw`] instead of dropped.
    ///
    /// [`ResultNext::FoundRaw`]: crate::common::ResultNext#variant.FoundRaw
    error_mode: bool,
    /// Identifier of the most recently opened source; stamped onto
    /// completed records.
    source_id: FPath,
}

impl LogReader {
    /// Create a new `LogReader`; the given sources are enqueued in order,
    /// none are opened yet.
    pub fn new<I>(sources: I) -> LogReader
    where
        I: IntoIterator,
        I::Item: Into<LogSource>,
    {
        LogReader {
            pending: sources.into_iter().map(Into::into).collect(),
            active: None,
            buffer: Vec::with_capacity(2),
            error_mode: false,
            source_id: FPath::default(),
        }
    }

    /// Append sources to the end of the pending queue, preserving order.
    ///
    /// Callable at any time, including after all earlier sources are
    /// exhausted; a caller that detects log rotation pushes the rotated
    /// files here and keeps calling [`next`].
    ///
    /// [`next`]: self::LogReader#method.next
    pub fn push_sources<I>(
        &mut self,
        sources: I,
    ) where
        I: IntoIterator,
        I::Item: Into<LogSource>,
    {
        self.pending.extend(sources.into_iter().map(Into::into));
    }

    /// Append one source to the end of the pending queue.
    pub fn push_source<S>(
        &mut self,
        source: S,
    ) where
        S: Into<LogSource>,
    {
        self.pending.push_back(source.into());
    }

    /// When enabled, lines matching no recognized pattern are returned to
    /// the caller as raw trimmed strings instead of silently dropped.
    pub fn set_error_mode(
        &mut self,
        error_mode: bool,
    ) {
        self.error_mode = error_mode;
    }

    pub fn error_mode(&self) -> bool {
        self.error_mode
    }

    /// Return the next completed [`Record`], a raw unrecognized line
    /// (error mode only), or [`Done`] when the pending queue and active
    /// source are both exhausted.
    ///
    /// Performs a bounded amount of blocking line reads. Opens queued
    /// sources lazily; rolls over between sources seamlessly (no `Done` in
    /// between). The final source is never closed, so calling again after
    /// `Done` re-polls it and yields records assembled from lines appended
    /// since.
    ///
    /// A buffered record whose `folder` never got set is discarded, not
    /// returned; see the module documentation.
    ///
    /// [`Record`]: crate::data::record::Record
    /// [`Done`]: crate::common::ResultNext#variant.Done
    pub fn next(&mut self) -> ResultNextRecord {
        defn!();
        // outer retry loop; discarding an incomplete record restarts the
        // whole algorithm
        loop {
            debug_assert_le!(self.buffer.len(), 1, "more than one record in assembly");
            if self.active.is_none() && !self.open_next_source() {
                defx!("no sources; return Done");
                return ResultNext::Done;
            }
            match self.read_lines() {
                ReadLines::Dequeued(mut record) => {
                    if !record.is_complete() {
                        // a fragment without a terminating Folder line;
                        // drop it per the tolerance policy
                        defo!("discard incomplete record {:?}", record);
                        continue;
                    }
                    record.set_source(&self.source_id);
                    defx!("return Found({:?})", record);
                    return ResultNext::Found(record);
                }
                ReadLines::Raw(line) => {
                    defx!("return FoundRaw({:?})", line);
                    return ResultNext::FoundRaw(line);
                }
                ReadLines::Eof => {
                    if self.pending.is_empty() {
                        // never close the final source; a later call may
                        // find lines appended after this point
                        defx!("final source exhausted; return Done");
                        return ResultNext::Done;
                    }
                    defo!("roll over from source {:?}", self.source_id);
                    self.active = None;
                }
            }
        }
    }

    /// Dequeue and open the next pending source, recording its identifier.
    /// A source that fails to open is reported and skipped; returns `false`
    /// once the queue is empty.
    fn open_next_source(&mut self) -> bool {
        while let Some(source) = self.pending.pop_front() {
            let opened: OpenedSource = match source {
                LogSource::Path(path) => match File::open(&path) {
                    Ok(file) => OpenedSource {
                        id: path,
                        reader: Box::new(BufReader::new(file)),
                    },
                    Err(err) => {
                        // non-fatal; treat the source as unreadable/empty
                        e_err!("unable to open {:?}: {}", path, err);
                        continue;
                    }
                },
                LogSource::Handle(description, reader) => OpenedSource {
                    id: description,
                    reader,
                },
            };
            defo!("opened source {:?}", opened.id);
            self.source_id = opened.id.clone();
            self.active = Some(opened);
            return true;
        }

        false
    }

    /// Read lines from the active source, advancing the assembly state
    /// machine, until a record leaves the buffer, an unrecognized line
    /// must be surfaced, or end-of-input.
    fn read_lines(&mut self) -> ReadLines {
        let active: &mut OpenedSource = match self.active.as_mut() {
            Some(val) => val,
            None => return ReadLines::Eof,
        };
        loop {
            let mut line = String::new();
            match active.reader.read_line(&mut line) {
                Ok(0) => return ReadLines::Eof,
                Ok(_) => {}
                Err(err) => {
                    // non-fatal; treat like end of this source
                    e_err!("unable to read from {:?}: {}", active.id, err);
                    return ReadLines::Eof;
                }
            }
            let line: &str = line.trim_end_matches(['\n', '\r']);
            if let Some(captures) = RE_FROM.captures(line) {
                // a new header starts a new record; a record already in
                // assembly is handed back now, folder or not, so the
                // following Subject line is not attributed to it
                let mut record = Record::new();
                record.set_from(&captures["from"]);
                record.set_date(&captures["date"]);
                self.buffer.push(record);
                defo!("From line; {} in buffer", self.buffer.len());
                if self.buffer.len() > 1 {
                    return ReadLines::Dequeued(self.buffer.remove(0));
                }
                continue;
            }
            if let Some(captures) = RE_SUBJECT.captures(line) {
                defo!("Subject line");
                if self.buffer.is_empty() {
                    // a Subject line with no prior From line still starts
                    // a record
                    self.buffer.push(Record::new());
                }
                if let Some(record) = self.buffer.last_mut() {
                    record.set_subject(&captures["subject"]);
                }
                continue;
            }
            if let Some(captures) = RE_FOLDER.captures(line) {
                defo!("Folder line");
                if self.buffer.is_empty() {
                    self.buffer.push(Record::new());
                }
                if let Some(record) = self.buffer.last_mut() {
                    record.set_folder(&captures["folder"]);
                    // the capture is a plain digit run; parse only fails on
                    // u64 overflow
                    if let Ok(size) = captures["size"].parse::<u64>() {
                        record.set_size(size);
                    }
                }
                // the Folder line completes a record immediately
                return ReadLines::Dequeued(self.buffer.remove(0));
            }
            if line.trim().is_empty() {
                continue;
            }
            if self.error_mode {
                return ReadLines::Raw(String::from(line.trim()));
            }
            defo!("drop unrecognized line {:?}", line);
        }
    }
}

impl fmt::Debug for LogReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("LogReader")
            .field("pending", &self.pending)
            .field("active", &self.active.as_ref().map(|opened| &opened.id))
            .field("buffer", &self.buffer)
            .field("error_mode", &self.error_mode)
            .field("source_id", &self.source_id)
            .finish()
    }
}
