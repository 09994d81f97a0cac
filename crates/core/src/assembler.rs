//! Entry assembler.
//!
//! Groups tokenized rows into schedule entries. The register wraps every
//! cell over several physical lines with nothing marking the wrap, so rows
//! are classified as entry starts, note starts or continuations, and one row
//! of lookahead decides when an entry stops taking continuation text.
//!
//! The scan is a fold: [`EntryAssembler::step`] takes one row plus a
//! read-only [`RowCursor`] over the rows after it and may emit the entry it
//! sealed. [`assemble`] drives it over a whole row sequence.

use tracing::{debug, info};

use crate::entry::{Entry, EntryText};
use crate::row::{Row, RowKind};

/// Read-only cursor over a row sequence.
///
/// The cursor is `Copy`: handing a copy to the note lookahead lets it read
/// ahead without moving the main scan.
#[derive(Debug, Clone, Copy)]
pub struct RowCursor<'a> {
    rows: &'a [Row],
    pos: usize,
}

impl<'a> RowCursor<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self { rows, pos: 0 }
    }

    /// Index of the next row to be returned.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<&'a Row> {
        self.rows.get(self.pos)
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = &'a Row;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.get(self.pos)?;
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rows.len().saturating_sub(self.pos);
        (n, Some(n))
    }
}

/// Entry being accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenEntry {
    number: String,
    text: EntryText,
}

impl OpenEntry {
    /// The registration column starts empty; its text arrives on the
    /// following rows.
    fn start(row: &Row) -> Self {
        let [number, description, term, title] = row.fields().clone();
        Self {
            number,
            text: EntryText {
                registration_date_and_plan_ref: String::new(),
                property_description: description,
                lease_date_and_term: term,
                lessee_title: title,
                note: None,
            },
        }
    }

    fn append(&mut self, row: &Row) {
        let [reg, description, term, title] = row.fields();
        let text = &mut self.text;
        text.registration_date_and_plan_ref.push(' ');
        text.registration_date_and_plan_ref.push_str(reg);
        text.registration_date_and_plan_ref.push(' ');
        for (dst, src) in [
            (&mut text.property_description, description),
            (&mut text.lease_date_and_term, term),
            (&mut text.lessee_title, title),
        ] {
            dst.push(' ');
            dst.push_str(src);
        }
    }

    /// Take the note starting at `row` and every row after it up to the
    /// next entry start.
    fn absorb_note(&mut self, row: &Row, ahead: RowCursor<'_>) {
        let mut note = row.joined();
        for next in ahead.take_while(|r| !r.is_entry_start()) {
            note.push(' ');
            note.push_str(&next.concatenated());
        }
        self.text.note = Some(note);
    }

    fn seal(self) -> Entry {
        Entry::new(self.number, self.text)
    }
}

/// State of the entry scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryAssembler {
    open: Option<OpenEntry>,
    /// Set once a blank or note row follows the open entry; later
    /// continuation rows no longer extend its columns.
    done: bool,
}

impl EntryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the entry currently accumulating, if any.
    pub fn open_entry_number(&self) -> Option<&str> {
        self.open.as_ref().map(|e| e.number.as_str())
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Process one row.
    ///
    /// `ahead` yields the rows following `row`; it is only read. Returns the
    /// entry sealed by this row, if any.
    pub fn step(&mut self, row: &Row, ahead: RowCursor<'_>) -> Option<Entry> {
        match row.kind() {
            RowKind::EntryStart => {
                let sealed = self.open.take().map(OpenEntry::seal);
                self.open = Some(OpenEntry::start(row));
                self.done = false;
                sealed
            }
            RowKind::Note => {
                match self.open.as_mut() {
                    Some(open) => open.absorb_note(row, ahead),
                    None => debug!(
                        row = ahead.position().saturating_sub(1),
                        "note before first entry: {}",
                        row
                    ),
                }
                None
            }
            RowKind::Blank | RowKind::Continuation => {
                let Some(open) = self.open.as_mut() else {
                    debug!(
                        row = ahead.position().saturating_sub(1),
                        "row before first entry: {}",
                        row
                    );
                    return None;
                };
                if !self.done {
                    open.append(row);
                }
                open.text.trim_all();

                let next = ahead.peek().unwrap_or(row);
                if next.is_blank() || next.is_note() {
                    self.done = true;
                }
                None
            }
        }
    }

    /// Seal the open entry at end of input.
    pub fn finish(self) -> Option<Entry> {
        self.open.map(OpenEntry::seal)
    }
}

/// Assemble entries from rows, in order of their entry numbers' rows.
///
/// `rows` should start at the first entry; rows before it are skipped.
pub fn assemble(rows: &[Row]) -> Vec<Entry> {
    info!("assembling schedule entries");
    let mut assembler = EntryAssembler::new();
    let mut cursor = RowCursor::new(rows);
    let mut entries = Vec::new();

    while let Some(row) = cursor.next() {
        if let Some(entry) = assembler.step(row, cursor) {
            entries.push(entry);
        }
    }
    entries.extend(assembler.finish());

    info!(entries = entries.len(), "assembled schedule entries");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(data: &[[&str; 4]]) -> Vec<Row> {
        data.iter().map(|r| Row::from_strs(*r)).collect()
    }

    #[test]
    fn continuation_extends_columns() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["", "more desc", "", " "],
            ["2", "Plot B", "50 years", "A Lee"],
        ]));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_text.property_description, "Plot A more desc");
        assert_eq!(entries[0].entry_text.lease_date_and_term, "99 years");
        assert_eq!(entries[0].entry_text.lessee_title, "J Smith");
        assert_eq!(entries[0].entry_text.registration_date_and_plan_ref, "");
        assert_eq!(entries[1].entry_number, "2");
        assert_eq!(entries[1].entry_text.property_description, "Plot B");
        assert_eq!(entries[1].entry_text.note, None);
    }

    #[test]
    fn registration_column_comes_from_continuations() {
        let entries = assemble(&rows(&[
            ["1", "Flat 3", "01.12.2008", "EGL551039"],
            ["28.01.2009", "12 Park Road", "125 years", ""],
            ["Edged and", "", "", ""],
            ["numbered 2", "", "", ""],
        ]));
        let text = &entries[0].entry_text;
        assert_eq!(text.registration_date_and_plan_ref, "28.01.2009 Edged and numbered 2");
        assert_eq!(text.property_description, "Flat 3 12 Park Road");
        assert_eq!(text.lease_date_and_term, "01.12.2008 125 years");
    }

    #[test]
    fn note_reads_ahead_to_next_entry() {
        let entries = assemble(&rows(&[
            ["4", "Plot D", "21 years", "K Doe"],
            ["NOTE restriction applies", "", "", ""],
            ["continued", "text", "", ""],
            ["5", "Plot A", "99 years", "J Smith"],
        ]));
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].entry_text.note.as_deref(),
            Some("NOTE restriction applies continuedtext")
        );
        assert_eq!(entries[1].entry_number, "5");
        assert_eq!(entries[1].entry_text.note, None);
    }

    #[test]
    fn note_lookahead_does_not_consume_rows() {
        // The note directly follows the entry start, so nothing has marked
        // the entry done and the note's tail also extends the columns.
        let entries = assemble(&rows(&[
            ["4", "Plot D", "21 years", "K Doe"],
            ["NOTE restriction applies", "", "", ""],
            ["continued", "text", "", ""],
        ]));
        let text = &entries[0].entry_text;
        assert_eq!(text.registration_date_and_plan_ref, "continued");
        assert_eq!(text.property_description, "Plot D text");
    }

    #[test]
    fn row_before_note_ends_column_text() {
        let entries = assemble(&rows(&[
            ["7", "Shop 1", "10 years", "T1"],
            ["12.05.2001", "Ground floor", "from 1.1.2001", ""],
            ["NOTE: The lease", "", "", ""],
            ["prohibits", "assignment", "", ""],
            ["8", "Shop 2", "15 years", "T2"],
        ]));
        let text = &entries[0].entry_text;
        assert_eq!(text.registration_date_and_plan_ref, "12.05.2001");
        assert_eq!(text.property_description, "Shop 1 Ground floor");
        assert_eq!(text.note.as_deref(), Some("NOTE: The lease prohibitsassignment"));
    }

    #[test]
    fn blank_row_ends_column_text() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["x", "", "", ""],
            ["", "", "", ""],
            ["stray", "more", "", ""],
        ]));
        let text = &entries[0].entry_text;
        assert_eq!(text.registration_date_and_plan_ref, "x");
        assert_eq!(text.property_description, "Plot A");
    }

    #[test]
    fn entry_start_resets_done() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["a", "", "", ""],
            ["", "", "", ""],
            ["2", "Plot B", "50 years", "A Lee"],
            ["b", "", "", ""],
        ]));
        assert_eq!(entries[0].entry_text.registration_date_and_plan_ref, "a");
        assert_eq!(entries[1].entry_text.registration_date_and_plan_ref, "b");
    }

    #[test]
    fn note_at_end_of_rows() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["x", "", "", ""],
            ["NOTE: last", "", "", ""],
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_text.note.as_deref(), Some("NOTE: last"));
    }

    #[test]
    fn blank_row_after_note_is_trimmed_away() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["x", "", "", ""],
            ["NOTE: a", "", "", ""],
            ["", "", "", ""],
        ]));
        assert_eq!(entries[0].entry_text.note.as_deref(), Some("NOTE: a"));
    }

    #[test]
    fn last_entry_sealed_once() {
        let entries = assemble(&rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["2", "Plot B", "50 years", "A Lee"],
        ]));
        assert_eq!(
            entries.iter().map(|e| e.entry_number.as_str()).collect::<Vec<_>>(),
            vec!["1", "2"]
        );
    }

    #[test]
    fn orphan_rows_before_first_entry_are_skipped() {
        let entries = assemble(&rows(&[
            ["NOTE: orphan", "", "", ""],
            ["front matter", "", "", ""],
            ["1", "Plot A", "99 years", "J Smith"],
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_text.note, None);
        assert_eq!(entries[0].entry_text.registration_date_and_plan_ref, "");
    }

    #[test]
    fn empty_input() {
        assert!(assemble(&[]).is_empty());
    }

    #[test]
    fn step_reports_sealed_entry() {
        let data = rows(&[
            ["1", "Plot A", "99 years", "J Smith"],
            ["2", "Plot B", "50 years", "A Lee"],
        ]);
        let mut cursor = RowCursor::new(&data);
        let mut assembler = EntryAssembler::new();

        let first = cursor.next().unwrap();
        assert_eq!(assembler.step(first, cursor), None);
        assert_eq!(assembler.open_entry_number(), Some("1"));

        let second = cursor.next().unwrap();
        let sealed = assembler.step(second, cursor).unwrap();
        assert_eq!(sealed.entry_number, "1");
        assert_eq!(assembler.finish().unwrap().entry_number, "2");
    }

    #[test]
    fn cursor_copy_reads_without_advancing() {
        let data = rows(&[["1", "", "", ""], ["2", "", "", ""], ["3", "", "", ""]]);
        let mut cursor = RowCursor::new(&data);
        cursor.next();
        let ahead: Vec<_> = cursor.map(|r| r.fields()[0].clone()).collect();
        assert_eq!(ahead, vec!["2", "3"]);
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek().unwrap().fields()[0], "2");
    }
}
