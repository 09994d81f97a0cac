//! lease-schedule - Extract the Schedule of Notices of Leases from
//! land-registry register text.
//!
//! The pipeline runs in two stages. The [`tokenizer`] splits raw extracted
//! lines into four-column rows; the [`assembler`] groups those rows into
//! entries with their notes. [`high_level`] ties both to a
//! [`source::PageTextSource`] and the JSON output.

pub mod assembler;
pub mod entry;
pub mod error;
pub mod high_level;
pub mod params;
pub mod row;
pub mod source;
pub mod tokenizer;

pub use assembler::{EntryAssembler, RowCursor, assemble};
pub use entry::{Entry, EntryText, LeaseSchedule};
pub use error::{AmbiguityKind, ParseAmbiguity, Result, ScheduleError};
pub use high_level::{ScheduleReport, extract_schedule, save_schedule, schedule_from_lines};
pub use params::{ClipRect, ScheduleParams, TwoChunkPlacement};
pub use row::{Column, Row, RowKind};
pub use source::{PageTextSource, TextPages};
pub use tokenizer::RowTokenizer;
