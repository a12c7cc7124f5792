//! The verbosity scale shared with the host logging framework.
//!
//! Levels are plain integers, larger meaning more severe, with named
//! thresholds at the usual points. The gaps between the constants leave room
//! for custom in-between levels; [`severity_for`](crate::severity::severity_for)
//! maps any integer on this scale onto the syslog severity scale.

use crate::error::Error;

pub const NOTSET: i32 = 0;
pub const TRACE: i32 = 5;
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;
pub const CRITICAL: i32 = 50;

/// Known level names, including the WARN/FATAL aliases kept for interop with
/// other logging stacks.
const NAMES: [(&str, i32); 9] = [
    ("NOTSET", NOTSET),
    ("TRACE", TRACE),
    ("DEBUG", DEBUG),
    ("INFO", INFO),
    ("WARNING", WARNING),
    ("WARN", WARNING),
    ("ERROR", ERROR),
    ("CRITICAL", CRITICAL),
    ("FATAL", CRITICAL),
];

/// Looks `name` up in the level table. Names are matched exactly.
pub fn name_to_level(name: &str) -> Option<i32> {
    NAMES.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Display name for `level`. Numbers without a canonical name print as
/// `Level <n>`.
pub fn level_to_name(level: i32) -> String {
    let name = match level {
        NOTSET => "NOTSET",
        TRACE => "TRACE",
        DEBUG => "DEBUG",
        INFO => "INFO",
        WARNING => "WARNING",
        ERROR => "ERROR",
        CRITICAL => "CRITICAL",
        other => return format!("Level {}", other),
    };
    name.to_string()
}

/// The integer level for a `log` crate record.
pub fn from_log(level: log::Level) -> i32 {
    match level {
        log::Level::Error => ERROR,
        log::Level::Warn => WARNING,
        log::Level::Info => INFO,
        log::Level::Debug => DEBUG,
        log::Level::Trace => TRACE,
    }
}

/// A level argument accepted as either a raw number or a name from the
/// level table. Names resolve at
/// [`Builder::build`](crate::Builder::build) time; unknown ones fail with
/// [`Error::InvalidLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSpec {
    Num(i32),
    Name(String),
}

impl LevelSpec {
    pub fn resolve(&self) -> Result<i32, Error> {
        match self {
            LevelSpec::Num(n) => Ok(*n),
            LevelSpec::Name(name) => {
                name_to_level(name).ok_or_else(|| Error::InvalidLevel(name.clone()))
            }
        }
    }
}

impl From<i32> for LevelSpec {
    fn from(level: i32) -> Self {
        LevelSpec::Num(level)
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        LevelSpec::Name(name)
    }
}

impl From<log::Level> for LevelSpec {
    fn from(level: log::Level) -> Self {
        LevelSpec::Num(from_log(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DEBUG", Some(DEBUG))]
    #[case("INFO", Some(INFO))]
    #[case("WARNING", Some(WARNING))]
    #[case("WARN", Some(WARNING))]
    #[case("ERROR", Some(ERROR))]
    #[case("FATAL", Some(CRITICAL))]
    #[case("info", None)]
    #[case("NOTALEVEL", None)]
    fn name_lookup(#[case] name: &str, #[case] expect: Option<i32>) {
        assert_eq!(name_to_level(name), expect);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(level_to_name(WARNING), "WARNING");
        assert_eq!(level_to_name(CRITICAL), "CRITICAL");
        assert_eq!(level_to_name(35), "Level 35");
    }

    #[test]
    fn level_arg_resolution() {
        assert_eq!(LevelSpec::from("INFO").resolve(), Ok(INFO));
        assert_eq!(LevelSpec::from(25).resolve(), Ok(25));
        assert_eq!(LevelSpec::from(log::Level::Warn).resolve(), Ok(WARNING));
        assert_eq!(
            LevelSpec::from("NOTALEVEL").resolve(),
            Err(Error::InvalidLevel("NOTALEVEL".to_string()))
        );
    }
}
