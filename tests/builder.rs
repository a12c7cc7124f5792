use std::collections::HashMap;

use syslogformat::{facility, level, Builder, Error, Record, Style, SyslogFormatter};

#[test]
fn facility_validation() {
    assert!(Builder::new().facility(facility::KERNEL).build().is_ok());
    assert!(Builder::new().facility(facility::LOCAL7).build().is_ok());

    let err = Builder::new().facility(24).build().unwrap_err();
    assert_eq!(err, Error::NonStandardFacility(24));

    let err = Builder::new().facility(25).build().unwrap_err();
    assert_eq!(err, Error::NonStandardFacility(25));
    assert_eq!(err.to_string(), "syslog facility code invalid: 25");
}

#[test]
fn validation_can_be_disabled() {
    let formatter = Builder::new().facility(25).no_validate().build().unwrap();
    let mut record = Record::new(level::DEBUG, "foo");
    // 25 * 8 + 7, used unchanged in PRI arithmetic
    assert_eq!(formatter.format(&mut record), "<207>DEBUG   | foo");
}

#[test]
fn threshold_names_are_validated() {
    let err = Builder::new().detail_threshold("NOTALEVEL").build().unwrap_err();
    assert_eq!(err, Error::InvalidLevel("NOTALEVEL".to_string()));
    assert_eq!(err.to_string(), "unknown log level: 'NOTALEVEL'");

    // A known name normalizes to its level number.
    let formatter = Builder::new().detail_threshold("INFO").build().unwrap();
    let mut record = Record::new(level::INFO, "bar").location("mod", "func", 5);
    assert_eq!(formatter.format(&mut record), "<14>INFO    | bar | mod.func.5");
}

#[test]
fn defaults_feed_custom_templates() {
    let mut defaults = HashMap::new();
    defaults.insert("app".to_string(), "webd".to_string());
    let formatter = Builder::new()
        .fmt("%(app)s %(message)s")
        .defaults(defaults)
        .build()
        .unwrap();
    let mut record = Record::new(level::INFO, "bar");
    assert_eq!(formatter.format(&mut record), "<14>webd bar");
}

#[test]
fn brace_and_dollar_styles() {
    let formatter = Builder::new()
        .fmt("[{name}] {message}")
        .style(Style::Brace)
        .build()
        .unwrap();
    let mut record = Record::new(level::INFO, "bar").name("app");
    assert_eq!(formatter.format(&mut record), "<14>[app] bar");

    let formatter = Builder::new()
        .fmt("$level $message")
        .style(Style::Dollar)
        .build()
        .unwrap();
    let mut record = Record::new(level::ERROR, "oh no");
    assert_eq!(formatter.format(&mut record), "<11>ERROR oh no");
}

#[test]
fn timestamp_uses_datefmt() {
    let formatter = Builder::new()
        .fmt("%(timestamp)s %(message)s")
        .datefmt("%Y")
        .build()
        .unwrap();
    let mut record = Record::new(level::INFO, "bar");
    let line = formatter.format(&mut record);
    let year = record.created.format("%Y").to_string();
    assert_eq!(line, format!("<14>{} bar", year));
}

#[test]
fn builder_defaults() {
    let builder = Builder::new();
    assert_eq!(builder.facility, facility::USER);
    assert_eq!(builder.line_break_repl.as_deref(), Some(" --> "));
    assert!(builder.validate);
    assert!(builder.prepend_level_name);
    assert!(builder.fmt.is_none());

    // SyslogFormatter::new() is the same default config.
    let mut record = Record::new(level::DEBUG, "foo");
    assert_eq!(SyslogFormatter::new().format(&mut record), "<15>DEBUG   | foo");
}
