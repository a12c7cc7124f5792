//! A log-record formatter producing single-line, syslog-PRI-prefixed text.
//!
//! Each record gets a `<PRI>` prefix computed from the configured facility
//! and the record's level, an aligned level-name column, the message body,
//! and, above a configurable level, a source-location suffix. Exception and
//! stack text are folded into the same line, with line breaks replaced by a
//! visible separator, so one event is always one line on the collector side.
//!
//! Transport is out of scope: hand the returned string to whatever sink the
//! surrounding logging pipeline uses.
//!
//! ```
//! use syslogformat::{level, Record, SyslogFormatter};
//!
//! let formatter = SyslogFormatter::new();
//! let mut record = Record::new(level::INFO, "service started");
//! assert_eq!(formatter.format(&mut record), "<14>INFO    | service started");
//! ```

pub mod facility;
pub mod level;
pub mod severity;

mod error;
mod formatter;
mod record;
mod templates;

pub use self::{
    error::Error,
    formatter::{Builder, SyslogFormatter, DEFAULT_LINE_BREAK_REPL},
    level::LevelSpec,
    record::{ExcInfo, Record},
    templates::Style,
};
