//! Resolve command for inspecting a single time expression.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use dayplan_core::resolve_time;

/// Runs the resolve command, projecting `expr` onto `date`.
pub fn run<W: Write>(writer: &mut W, expr: &str, date: NaiveDate) -> Result<()> {
    let Some(time) = resolve_time(expr) else {
        bail!("unrecognised time expression: {expr}");
    };
    let Some(at) = time.on(date) else {
        bail!("{expr} cannot be placed on {date}");
    };

    writeln!(writer, "qualifier: {}", time.qualifier)?;
    writeln!(writer, "clock:     {time}")?;
    writeln!(writer, "at:        {}", at.format("%Y-%m-%d %H:%M"))?;

    Ok(())
}
