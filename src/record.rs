//! The log-record shape consumed by the formatter.

use backtrace::Backtrace;
use chrono::{DateTime, Local};

use crate::level;

/// Failure payload attached to a record logged from an error context.
pub struct ExcInfo {
    /// Failure kind, usually an error type name.
    pub kind: String,
    /// Failure message.
    pub message: String,
    /// Trace captured at the failure site, when the caller took one.
    pub backtrace: Option<Backtrace>,
}

impl ExcInfo {
    pub fn new<K: Into<String>, M: Into<String>>(kind: K, message: M) -> Self {
        Self { kind: kind.into(), message: message.into(), backtrace: None }
    }

    /// Attach a captured trace to render above the `kind: message` line.
    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Payload from any error value, with the type name as the kind.
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        Self::new(std::any::type_name::<E>(), err.to_string())
    }

    /// Renders the payload into the text block cached on the record: the
    /// captured trace, then `kind: message` as the final line, trailing
    /// whitespace stripped.
    pub(crate) fn render(&self) -> String {
        let mut text = String::new();
        if let Some(bt) = &self.backtrace {
            text.push_str(&format!("{:?}", bt));
            if !text.ends_with('\n') {
                text.push('\n');
            }
        }
        text.push_str(&self.kind);
        if !self.message.is_empty() {
            text.push_str(": ");
            text.push_str(&self.message);
        }
        text.trim_end().to_string()
    }
}

/// One loggable event.
///
/// Records are created per event by the logging subsystem and discarded after
/// formatting. The formatter reads every field but writes only one:
/// [`exc_text`](Record::exc_text), the exception-text cache, which is filled
/// at most once per record and reused by later `format` calls.
pub struct Record {
    /// Verbosity level, larger is more severe. See [`crate::level`].
    pub level: i32,
    /// Display name for `level`.
    pub level_name: String,
    /// Logger name / target.
    pub name: String,
    /// Rendered message body.
    pub message: String,
    /// Source module.
    pub module: String,
    /// Source function.
    pub function: String,
    /// Source line.
    pub line: u32,
    /// Event creation time.
    pub created: DateTime<Local>,
    /// Failure payload, present when logged from an error context.
    pub exc_info: Option<ExcInfo>,
    /// Rendered exception text. Left unset by callers; set once by the
    /// formatter (or pre-filled to skip rendering).
    pub exc_text: Option<String>,
    /// Pre-rendered stack trace text.
    pub stack_info: Option<String>,
}

impl Record {
    pub fn new<M: Into<String>>(level: i32, message: M) -> Self {
        Self {
            level,
            level_name: level::level_to_name(level),
            name: String::new(),
            message: message.into(),
            module: String::new(),
            function: String::new(),
            line: 0,
            created: Local::now(),
            exc_info: None,
            exc_text: None,
            stack_info: None,
        }
    }

    /// Set the logger name / target.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the source location rendered into the detail suffix.
    pub fn location<M: Into<String>, F: Into<String>>(
        mut self, module: M, function: F, line: u32,
    ) -> Self {
        self.module = module.into();
        self.function = function.into();
        self.line = line;
        self
    }

    /// Attach a failure payload.
    pub fn exception(mut self, info: ExcInfo) -> Self {
        self.exc_info = Some(info);
        self
    }

    /// Attach pre-rendered stack trace text.
    pub fn stack<S: Into<String>>(mut self, stack: S) -> Self {
        self.stack_info = Some(stack.into());
        self
    }

    /// Builds a record from the host framework's borrowed record.
    ///
    /// The `log` crate carries no function name, so
    /// [`function`](Record::function) stays empty unless filled afterwards.
    pub fn from_log(record: &log::Record<'_>) -> Self {
        let level = level::from_log(record.level());
        let mut r = Record::new(level, format!("{}", record.args()));
        r.name = record.target().to_string();
        r.module = module_name(record);
        r.line = record.line().unwrap_or(0);
        r
    }

    /// The cache behind formatting step 6: renders [`exc_info`](Record::exc_info)
    /// on first call, stores the text, and returns the stored text afterwards.
    pub(crate) fn cached_exc_text(&mut self) -> Option<&str> {
        if self.exc_text.is_none() {
            if let Some(info) = &self.exc_info {
                self.exc_text = Some(info.render());
            }
        }
        self.exc_text.as_deref()
    }
}

fn module_name(record: &log::Record<'_>) -> String {
    if let Some(path) = record.module_path() {
        return path.to_string();
    }
    match record.file() {
        Some(file) => basename(file).trim_end_matches(".rs").to_string(),
        None => String::new(),
    }
}

fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => path.get(idx + 1..).unwrap_or(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level;

    #[test]
    fn exc_render_without_backtrace() {
        let info = ExcInfo::new("ParseIntError", "invalid digit found in string");
        assert_eq!(info.render(), "ParseIntError: invalid digit found in string");
        let bare = ExcInfo::new("Interrupted", "");
        assert_eq!(bare.render(), "Interrupted");
    }

    #[test]
    fn exc_text_rendered_once() {
        let mut record = Record::new(level::ERROR, "boom")
            .exception(ExcInfo::new("ValueError", "this is bad"));
        assert_eq!(record.cached_exc_text(), Some("ValueError: this is bad"));
        // Dropping the payload no longer matters, the cache answers.
        record.exc_info = None;
        assert_eq!(record.cached_exc_text(), Some("ValueError: this is bad"));
    }

    #[test]
    fn pre_filled_exc_text_wins() {
        let mut record = Record::new(level::ERROR, "boom")
            .exception(ExcInfo::new("ValueError", "this is bad"));
        record.exc_text = Some("already rendered".to_string());
        assert_eq!(record.cached_exc_text(), Some("already rendered"));
    }

    #[test]
    fn from_log_maps_level_and_location() {
        let host = log::Record::builder()
            .args(format_args!("hello"))
            .level(log::Level::Warn)
            .target("app")
            .module_path(Some("app::worker"))
            .line(Some(7))
            .build();
        let record = Record::from_log(&host);
        assert_eq!(record.level, level::WARNING);
        assert_eq!(record.level_name, "WARNING");
        assert_eq!(record.name, "app");
        assert_eq!(record.message, "hello");
        assert_eq!(record.module, "app::worker");
        assert_eq!(record.line, 7);
        assert_eq!(record.function, "");
    }

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename("src/worker.rs"), "worker.rs");
        assert_eq!(basename("worker.rs"), "worker.rs");
    }
}
