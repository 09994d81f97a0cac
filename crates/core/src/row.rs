//! Tokenized schedule rows.
//!
//! A [`Row`] is one extracted text line split into the four columns of the
//! schedule table. Rows are classified on demand; the classification drives
//! the entry assembler.

use std::fmt;

/// Number of columns in the schedule table.
pub const COLUMN_COUNT: usize = 4;

/// Marker that opens a note block in the first column.
pub const NOTE_MARKER: &str = "NOTE";

/// Column positions within a [`Row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    RegistrationDateAndPlanRef = 0,
    PropertyDescription = 1,
    LeaseDateAndTerm = 2,
    LesseeTitle = 3,
}

/// Classification of a row within the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// First column is an entry number.
    EntryStart,
    /// First column opens a note block.
    Note,
    /// All columns are empty.
    Blank,
    /// Text that extends the open entry.
    Continuation,
}

/// A tokenized line with exactly four (possibly empty) fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    fields: [String; COLUMN_COUNT],
}

impl Row {
    pub fn new(fields: [String; COLUMN_COUNT]) -> Self {
        Self { fields }
    }

    /// Build a row from string slices. Convenient for tests and fixtures.
    pub fn from_strs(fields: [&str; COLUMN_COUNT]) -> Self {
        Self {
            fields: fields.map(str::to_string),
        }
    }

    pub fn fields(&self) -> &[String; COLUMN_COUNT] {
        &self.fields
    }

    pub fn into_fields(self) -> [String; COLUMN_COUNT] {
        self.fields
    }

    pub fn get(&self, column: Column) -> &str {
        &self.fields[column as usize]
    }

    pub fn kind(&self) -> RowKind {
        if self.is_entry_start() {
            RowKind::EntryStart
        } else if self.is_note() {
            RowKind::Note
        } else if self.is_blank() {
            RowKind::Blank
        } else {
            RowKind::Continuation
        }
    }

    /// First field is a non-empty run of digits.
    pub fn is_entry_start(&self) -> bool {
        let first = &self.fields[0];
        !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn is_note(&self) -> bool {
        self.fields[0].starts_with(NOTE_MARKER)
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }

    /// Fields joined with single spaces, right-trimmed.
    ///
    /// Used for the first line of a note, where the marker text may have been
    /// split across columns by wide spacing.
    pub fn joined(&self) -> String {
        self.fields.join(" ").trim_end().to_string()
    }

    /// Fields concatenated without a separator.
    pub fn concatenated(&self) -> String {
        self.fields.concat()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.fields)
    }
}
