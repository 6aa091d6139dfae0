// src/common.rs
//
// common type aliases and result enums (avoids circular imports)

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`.
///
/// Also serves as the identifier of a log source; a handle-backed source
/// carries a caller-supplied description here instead of a real path.
pub type FPath = String;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for the LogReader `next` function
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result`-like tri-state returned by [`LogReader::next`].
///
/// Callers never have to inspect runtime types: a completed record, a raw
/// unrecognized line (error mode only), and end-of-data are distinct
/// variants. There is no `Err` variant; malformed input never raises
/// (see the module documentation of [`logreader`]).
///
/// [`LogReader::next`]: crate::readers::logreader::LogReader#method.next
/// [`logreader`]: crate::readers::logreader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultNext<T> {
    /// Contains one completed datum.
    Found(T),

    /// Contains one raw unrecognized line, trimmed.
    /// Only returned when error mode is enabled.
    FoundRaw(String),

    /// Pending sources and the active source are exhausted; nothing to
    /// return, no bad errors happened. Not a terminal state: more data may
    /// appear later (tailing) or more sources may be pushed.
    Done,
}

impl<T> ResultNext<T> {
    // Querying the contained values

    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: self::ResultNext#variant.Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultNext::Found(_))
    }

    /// Returns `true` if the result is [`FoundRaw`].
    ///
    /// [`FoundRaw`]: self::ResultNext#variant.FoundRaw
    #[inline(always)]
    pub const fn is_raw(&self) -> bool {
        matches!(*self, ResultNext::FoundRaw(_))
    }

    /// Returns `true` if the result is [`Done`].
    ///
    /// [`Done`]: self::ResultNext#variant.Done
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultNext::Done)
    }

    // Adapter for each variant

    /// Converts from `ResultNext<T>` to [`Option<T>`], consuming `self`,
    /// discarding any raw line.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn found(self) -> Option<T> {
        match self {
            ResultNext::Found(x) => Some(x),
            ResultNext::FoundRaw(_) => None,
            ResultNext::Done => None,
        }
    }

    /// Converts from `ResultNext<T>` to [`Option<String>`], consuming
    /// `self`, discarding any completed datum.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn raw(self) -> Option<String> {
        match self {
            ResultNext::Found(_) => None,
            ResultNext::FoundRaw(s) => Some(s),
            ResultNext::Done => None,
        }
    }
}

impl<T> fmt::Display for ResultNext<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ResultNext::Found(_) => write!(f, "ResultNext::Found"),
            ResultNext::FoundRaw(_) => write!(f, "ResultNext::FoundRaw"),
            ResultNext::Done => write!(f, "ResultNext::Done"),
        }
    }
}
