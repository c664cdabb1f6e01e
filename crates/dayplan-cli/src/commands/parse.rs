//! Parse command: plan text in, calendar events out.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use dayplan_core::{ExtractedEvent, IcsOptions, extract_events, render_ics};

use crate::cli::OutputFormat;

/// Reads plan text from `input`, or from stdin when it is absent or `-`.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read plan from stdin")?;
            Ok(text)
        }
    }
}

/// Runs the parse command, writing the extracted events to `writer`.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    date: Option<NaiveDate>,
    format: OutputFormat,
    calendar_name: &str,
) -> Result<()> {
    let events = extract_events(text, date);
    tracing::debug!(count = events.len(), ?format, "writing events");
    write_events(writer, &events, format, calendar_name, Utc::now())
}

fn write_events<W: Write>(
    writer: &mut W,
    events: &[ExtractedEvent],
    format: OutputFormat,
    calendar_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, events)?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for event in events {
                let json = serde_json::to_string(event)?;
                writeln!(writer, "{json}")?;
            }
        }
        OutputFormat::Text => write_text(writer, events)?,
        OutputFormat::Ics => {
            let options = IcsOptions {
                calendar_name,
                generated_at,
            };
            writer.write_all(render_ics(events, &options).as_bytes())?;
        }
    }
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, events: &[ExtractedEvent]) -> Result<()> {
    if events.is_empty() {
        writeln!(writer, "No events found.")?;
        return Ok(());
    }

    for event in events {
        let end_format = if event.end.date() == event.start.date() {
            "%H:%M"
        } else {
            "%Y-%m-%d %H:%M"
        };
        write!(
            writer,
            "{} - {}  {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format(end_format),
            event.title
        )?;
        match &event.description {
            Some(description) => writeln!(writer, " ({description})")?,
            None => writeln!(writer)?,
        }
    }

    Ok(())
}
