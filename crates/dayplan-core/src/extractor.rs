//! Schedule block extraction from day-plan Markdown.
//!
//! A plan is a list of time-range headers, each followed by a few detail
//! lines:
//!
//! ```text
//! # 2024年3月20日 学习计划
//!
//! - **上午 11:00 - 下午 2:30 (3小时):**
//!   - **科目:** 数学
//!   - **目标:** 完成作业
//! ```
//!
//! Every header whose two times resolve and whose detail lines carry a title
//! becomes one [`ExtractedEvent`]. Anything else is skipped without error.

use std::ops::ControlFlow;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::reference::resolve_reference_date;
use crate::resolver::{ResolvedTime, resolve_time};
use crate::types::{EventId, EventTitle};

/// `- **<start> - <end> [(...)]:**`
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*\*\*(.+?)\s*-\s*(.+?)\s*(?:\(.*?\))?:\*\*$").unwrap()
});

/// Number of lines after a header searched for detail markers.
pub const LOOKAHEAD_LINES: usize = 4;

const SUBJECT_MARKER: &str = "- **科目:**";
const ACTIVITY_MARKER: &str = "- **活动:**";
const GOAL_MARKER: &str = "- **目标:**";

/// A calendar event produced from one schedule block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEvent {
    /// Identifier unique within one extraction call.
    pub id: EventId,
    pub title: EventTitle,
    /// Local wall-clock start.
    pub start: NaiveDateTime,
    /// Local wall-clock end. Not guaranteed to be after `start`.
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A time-range header whose start and end both resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub start: ResolvedTime,
    pub end: ResolvedTime,
    /// Zero-based index of the header line.
    pub line: usize,
}

/// Title and description gathered from a header's lookahead window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct BlockDetails {
    title: String,
    description: String,
}

impl BlockDetails {
    /// Folds one trimmed detail line in. Later markers overwrite earlier ones.
    fn absorb(mut self, line: &str) -> Self {
        if let Some(rest) = line.strip_prefix(SUBJECT_MARKER) {
            rest.trim().clone_into(&mut self.title);
        } else if let Some(rest) = line.strip_prefix(ACTIVITY_MARKER) {
            rest.trim().clone_into(&mut self.title);
        } else if let Some(rest) = line.strip_prefix(GOAL_MARKER) {
            rest.trim().clone_into(&mut self.description);
        }
        self
    }
}

/// Trims surrounding whitespace and byte-order marks from a line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Whether a trimmed line ends a lookahead window.
///
/// Looser than [`HEADER_RE`]: any bold bullet containing a
/// spaced dash counts, including detail lines such as `- **目标:** A - B`.
fn ends_window(line: &str) -> bool {
    line.starts_with("- **") && line.contains(" - ")
}

fn collect_details(window: &[&str]) -> BlockDetails {
    let flow = window
        .iter()
        .map(|line| trim_line(line))
        .try_fold(BlockDetails::default(), |details, line| {
            let details = details.absorb(line);
            if ends_window(line) {
                ControlFlow::Break(details)
            } else {
                ControlFlow::Continue(details)
            }
        });

    match flow {
        ControlFlow::Break(details) | ControlFlow::Continue(details) => details,
    }
}

fn parse_header(index: usize, line: &str) -> Option<ScheduleBlock> {
    let caps = HEADER_RE.captures(trim_line(line))?;
    let (start_text, end_text) = (&caps[1], &caps[2]);

    match (resolve_time(start_text), resolve_time(end_text)) {
        (Some(start), Some(end)) => Some(ScheduleBlock {
            start,
            end,
            line: index,
        }),
        _ => {
            tracing::debug!(
                line = index + 1,
                start = start_text,
                end = end_text,
                "skipping block with unrecognised time"
            );
            None
        }
    }
}

fn blocks_in<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = ScheduleBlock> + 'a {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| parse_header(index, line))
}

/// Finds every time-range header in `text` whose times both resolve.
pub fn scan_blocks(text: &str) -> Vec<ScheduleBlock> {
    let lines: Vec<&str> = text.split('\n').collect();
    blocks_in(&lines).collect()
}

fn build_event(block: ScheduleBlock, lines: &[&str], date: NaiveDate) -> Option<ExtractedEvent> {
    let window_end = (block.line + 1 + LOOKAHEAD_LINES).min(lines.len());
    let details = collect_details(&lines[block.line + 1..window_end]);

    let Ok(title) = EventTitle::new(details.title) else {
        tracing::debug!(line = block.line + 1, "skipping block without a title");
        return None;
    };

    let (Some(start), Some(end)) = (block.start.on(date), block.end.on(date)) else {
        tracing::debug!(line = block.line + 1, %date, "skipping block outside the representable range");
        return None;
    };

    let description = Some(details.description).filter(|d| !d.is_empty());

    Some(ExtractedEvent {
        id: EventId::generate(start),
        title,
        start,
        end,
        description,
    })
}

/// Extracts calendar events from day-plan text.
///
/// Falls back to the local wall-clock date when neither the text nor the
/// caller supplies a reference date.
pub fn extract_events(text: &str, reference_date: Option<NaiveDate>) -> Vec<ExtractedEvent> {
    extract_events_with_clock(text, reference_date, &SystemClock)
}

/// Extracts calendar events, consulting `clock` only when neither the text
/// nor the caller supplies a reference date.
///
/// Events come back in header order. Blocks with an unrecognised time or no
/// title are dropped; start is never checked against end.
pub fn extract_events_with_clock<C: Clock + ?Sized>(
    text: &str,
    reference_date: Option<NaiveDate>,
    clock: &C,
) -> Vec<ExtractedEvent> {
    let date = resolve_reference_date(text, reference_date, clock);
    let lines: Vec<&str> = text.split('\n').collect();

    let events: Vec<ExtractedEvent> = blocks_in(&lines)
        .filter_map(|block| build_event(block, &lines, date))
        .collect();

    tracing::debug!(%date, count = events.len(), "extracted events");
    events
}
