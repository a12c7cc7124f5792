//! The line formatter: validated configuration plus the per-record assembly
//! pipeline.

use std::collections::HashMap;

use regex::{NoExpand, Regex};

use crate::{
    error::Error,
    facility, level,
    level::LevelSpec,
    record::Record,
    severity,
    templates::{Style, Template},
};

/// Token substituted for line breaks unless replacement is turned off.
pub const DEFAULT_LINE_BREAK_REPL: &str = " --> ";

/// Body template applied when the caller supplies none.
const DEFAULT_FMT: &str = "%(message)s";

/// strftime format for the `timestamp` placeholder when no datefmt is given.
const DEFAULT_DATE_FMT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Width of the level-name column. Fits the longest standard level name, so
/// the `| ` separator lines up across levels.
const LEVEL_NAME_WIDTH: usize = 8;

/// One newline sequence plus any following whitespace run.
const LINE_BREAK_PATTERN: &str = r"(?:\r\n|\r|\n)\s*";

/// Config for a [`SyslogFormatter`].
///
/// Every field has a working default; chain setters for the ones to change
/// and finish with [`build`](Builder::build), where validation happens.
///
/// ```
/// use syslogformat::{facility, Builder};
///
/// let formatter = Builder::new()
///     .facility(facility::LOCAL0)
///     .detail_threshold("ERROR")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    /// Explicit body template. Supplying one turns the built-in level-name
    /// and detail columns off.
    pub fmt: Option<String>,
    /// strftime format for the `timestamp` placeholder.
    pub datefmt: Option<String>,
    /// Placeholder style of `fmt`.
    pub style: Style,
    /// Reject facility codes outside the standard range.
    pub validate: bool,
    /// Fallback values for template placeholders no record attribute answers.
    pub defaults: Option<HashMap<String, String>>,
    /// Syslog facility for the PRI part.
    pub facility: u8,
    /// Line-break replacement token; `None` keeps raw line breaks.
    pub line_break_repl: Option<String>,
    /// Records at or above this level get the source-location suffix.
    pub detail_threshold: LevelSpec,
    /// Show the level-name column after the PRI part.
    pub prepend_level_name: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            fmt: None,
            datefmt: None,
            style: Style::Percent,
            validate: true,
            defaults: None,
            facility: facility::USER,
            line_break_repl: Some(DEFAULT_LINE_BREAK_REPL.to_string()),
            detail_threshold: LevelSpec::Num(level::WARNING),
            prepend_level_name: true,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit body template. See the module docs of
    /// [`crate::templates`] for the placeholder names.
    pub fn fmt<S: Into<String>>(mut self, fmt: S) -> Self {
        self.fmt = Some(fmt.into());
        self
    }

    /// strftime format used when the template shows a `timestamp`.
    pub fn datefmt<S: Into<String>>(mut self, datefmt: S) -> Self {
        self.datefmt = Some(datefmt.into());
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Accept facility codes outside the standard range. PRI arithmetic uses
    /// them unchanged, producing non-standard PRI values.
    pub fn no_validate(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn defaults(mut self, defaults: HashMap<String, String>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn facility(mut self, facility: u8) -> Self {
        self.facility = facility;
        self
    }

    /// Replace line breaks in the finished line with `repl`.
    pub fn line_break_repl<S: Into<String>>(mut self, repl: S) -> Self {
        self.line_break_repl = Some(repl.into());
        self
    }

    /// Keep raw line breaks, producing multi-line output.
    pub fn keep_line_breaks(mut self) -> Self {
        self.line_break_repl = None;
        self
    }

    /// Minimum level for the source-location suffix, as a number or a level
    /// name such as `"INFO"`.
    pub fn detail_threshold<L: Into<LevelSpec>>(mut self, threshold: L) -> Self {
        self.detail_threshold = threshold.into();
        self
    }

    pub fn prepend_level_name(mut self, on: bool) -> Self {
        self.prepend_level_name = on;
        self
    }

    /// Validates the config and builds the formatter.
    pub fn build(self) -> Result<SyslogFormatter, Error> {
        if self.validate && !facility::is_standard(self.facility) {
            return Err(Error::NonStandardFacility(self.facility));
        }
        let detail_threshold = self.detail_threshold.resolve()?;
        let custom_format = self.fmt.is_some();
        let template = Template::parse(
            self.fmt.as_deref().unwrap_or(DEFAULT_FMT),
            self.style,
            self.defaults,
        );
        Ok(SyslogFormatter {
            template,
            datefmt: self.datefmt,
            facility: self.facility,
            line_break_repl: self.line_break_repl,
            detail_threshold,
            prepend_level_name: self.prepend_level_name,
            custom_format,
            newline_re: Regex::new(LINE_BREAK_PATTERN).expect("line break pattern valid"),
        })
    }
}

/// Renders log records into single-line, syslog-PRI-prefixed strings.
///
/// It does three things to every record:
/// 1. prepends a PRI part computed from the facility and the record level,
/// 2. folds exception and stack text into the line,
/// 3. appends source-location details once a configured level is reached.
///
/// Configuration is immutable after construction, so one formatter may be
/// shared across threads formatting distinct records.
#[derive(Debug)]
pub struct SyslogFormatter {
    template: Template,
    datefmt: Option<String>,
    facility: u8,
    line_break_repl: Option<String>,
    detail_threshold: i32,
    prepend_level_name: bool,
    custom_format: bool,
    newline_re: Regex,
}

impl SyslogFormatter {
    /// Formatter with the default config.
    pub fn new() -> Self {
        Builder::default().build().expect("default config valid")
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Formats `record` into one line of text.
    ///
    /// Never fails. The one side effect is the write into
    /// [`Record::exc_text`]: a record with a failure payload gets its
    /// rendered exception text cached there on the first call, and later
    /// calls reuse it, so formatting the same record twice yields identical
    /// output.
    pub fn format(&self, record: &mut Record) -> String {
        let timestamp = if self.template.wants_time() {
            let fmt = self.datefmt.as_deref().unwrap_or(DEFAULT_DATE_FMT);
            Some(record.created.format(fmt).to_string())
        } else {
            None
        };
        let body = self.template.render(record, timestamp.as_deref());

        let mut line = severity::pri_part(record.level, self.facility);
        if !self.custom_format && self.prepend_level_name {
            line.push_str(&format!(
                "{:<width$}| ",
                record.level_name,
                width = LEVEL_NAME_WIDTH
            ));
        }
        line.push_str(&body);
        if !self.custom_format && record.level >= self.detail_threshold {
            line.push_str(&format!(
                " | {}.{}.{}",
                record.module, record.function, record.line
            ));
        }
        if let Some(text) = record.cached_exc_text() {
            if !text.is_empty() {
                line.push('\n');
                line.push_str(text);
            }
        }
        if let Some(stack) = &record.stack_info {
            let stack = stack.trim_end();
            if !stack.is_empty() {
                line.push('\n');
                line.push_str(stack);
            }
        }
        match &self.line_break_repl {
            // NoExpand: the token goes in verbatim even if it contains '$'.
            Some(repl) => self.newline_re.replace_all(&line, NoExpand(repl)).into_owned(),
            None => line,
        }
    }
}

impl Default for SyslogFormatter {
    fn default() -> Self {
        Self::new()
    }
}
