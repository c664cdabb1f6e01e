//! iCalendar (RFC 5545) rendering of extracted events.
//!
//! Start and end are written as floating local times, matching the
//! wall-clock interpretation used during extraction.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::extractor::ExtractedEvent;

/// Calendar name used when none is configured.
pub const DEFAULT_CALENDAR_NAME: &str = "My Calendar";

const PRODUCT_ID: &str = "-//dayplan//dayplan//EN";

/// Maximum content line length in octets, excluding the line break.
const MAX_LINE_OCTETS: usize = 75;

/// Settings for one rendered calendar.
#[derive(Debug, Clone)]
pub struct IcsOptions<'a> {
    /// Value of `X-WR-CALNAME`.
    pub calendar_name: &'a str,
    /// Value of every `DTSTAMP`.
    pub generated_at: DateTime<Utc>,
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Folds a content line so no physical line exceeds 75 octets.
///
/// Breaks only on character boundaries; continuation lines start with a
/// single space, which counts towards their length.
fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out
}

fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

struct Writer(String);

impl Writer {
    fn line(&mut self, name: &str, value: &str) {
        self.0.push_str(&fold_line(&format!("{name}:{value}")));
        self.0.push_str("\r\n");
    }
}

/// Renders `events` as a complete `VCALENDAR` document with CRLF line endings.
pub fn render_ics(events: &[ExtractedEvent], options: &IcsOptions<'_>) -> String {
    let stamp = options.generated_at.format("%Y%m%dT%H%M%SZ").to_string();
    let mut w = Writer(String::new());

    w.line("BEGIN", "VCALENDAR");
    w.line("VERSION", "2.0");
    w.line("PRODID", PRODUCT_ID);
    w.line("CALSCALE", "GREGORIAN");
    w.line("X-WR-CALNAME", &escape_text(options.calendar_name));

    for event in events {
        w.line("BEGIN", "VEVENT");
        w.line("UID", &format!("{}@dayplan", event.id));
        w.line("DTSTAMP", &stamp);
        w.line("DTSTART", &format_local(event.start));
        w.line("DTEND", &format_local(event.end));
        w.line("SUMMARY", &escape_text(event.title.as_str()));
        if let Some(description) = &event.description {
            w.line("DESCRIPTION", &escape_text(description));
        }
        w.line("END", "VEVENT");
    }

    w.line("END", "VCALENDAR");
    w.0
}
