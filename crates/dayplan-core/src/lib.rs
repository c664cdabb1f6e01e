//! Rule-based day-plan parser.
//!
//! This crate turns loosely structured Markdown plans into calendar events:
//! - Resolver: single time expressions (`下午 2:30`, `2:30 PM`, `14:30`)
//! - Extractor: time-range headers plus their title/description lines
//! - Reference date: embedded `YYYY年M月D日` declarations and rollover
//! - iCalendar export of the extracted events
//!
//! Extraction is synchronous, performs no I/O, and never fails: input it
//! cannot use is skipped.

pub mod clock;
mod extractor;
pub mod ics;
mod qualifier;
pub mod reference;
mod resolver;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use extractor::{
    ExtractedEvent, LOOKAHEAD_LINES, ScheduleBlock, extract_events, extract_events_with_clock,
    scan_blocks,
};
pub use ics::{IcsOptions, render_ics};
pub use qualifier::{TimeQualifier, UnknownQualifier};
pub use reference::{DateDeclaration, find_date_declaration, parse_reference_date};
pub use resolver::{ResolvedTime, resolve, resolve_time};
pub use types::{EventId, EventTitle, ValidationError};
