//! Row tokenizer behaviour on register lines.

use lease_schedule_core::error::AmbiguityKind;
use lease_schedule_core::params::{ScheduleParams, TwoChunkPlacement};
use lease_schedule_core::row::{COLUMN_COUNT, Row, RowKind};
use lease_schedule_core::tokenizer::{RowTokenizer, is_noise};

const REGISTER_LINES: &[&str] = &[
    "1       28.01.2009      Flat 3, 12 Park Road     01.12.2008      EGL551039",
    "        Edged and       London                   125 years from",
    "numbered 2",
    "NOTE: The lease prohibits assignment",
    "  Plot A   99 years",
    "1  Plot A",
    "  99 years",
    "2  Ground floor  flat  125 years from  TGL1",
    "",
    "          ",
];

#[test]
fn every_row_has_four_fields() {
    let tok = RowTokenizer::default();
    for line in REGISTER_LINES {
        let row = tok.tokenize(line).unwrap().row;
        assert_eq!(row.fields().len(), COLUMN_COUNT, "line {line:?}");
    }
}

#[test]
fn tokenizing_twice_is_identical() {
    let tok = RowTokenizer::default();
    for line in REGISTER_LINES {
        assert_eq!(tok.tokenize(line), tok.tokenize(line));
    }
}

#[test]
fn documented_two_chunk_examples() {
    let tok = RowTokenizer::default();
    assert_eq!(
        tok.tokenize("  Plot A   99 years").unwrap().row,
        Row::from_strs(["", "Plot A", "99 years", ""])
    );
    assert_eq!(
        tok.tokenize("1  Plot A").unwrap().row,
        Row::from_strs(["1", "", "Plot A", ""])
    );
}

#[test]
fn wide_layout_line() {
    let row = RowTokenizer::default()
        .tokenize(REGISTER_LINES[0])
        .unwrap()
        .row;
    // Five columns: the entry number and the registration date both sit
    // left of the description, so the merge joins date and description.
    assert_eq!(
        row,
        Row::from_strs([
            "1",
            "28.01.2009 Flat 3, 12 Park Road",
            "01.12.2008",
            "EGL551039"
        ])
    );
    assert_eq!(row.kind(), RowKind::EntryStart);
}

#[test]
fn indented_continuation_starts_empty() {
    let row = RowTokenizer::default()
        .tokenize(REGISTER_LINES[1])
        .unwrap()
        .row;
    // The leading gap becomes an empty first field and shifts the
    // remaining values one column right.
    assert_eq!(
        row,
        Row::from_strs(["", "Edged and", "London", "125 years from"])
    );
    assert_eq!(row.kind(), RowKind::Continuation);
}

#[test]
fn whitespace_only_lines_are_blank() {
    let tok = RowTokenizer::default();
    assert!(tok.tokenize("").unwrap().row.is_blank());
    assert!(tok.tokenize("          ").unwrap().row.is_blank());
}

#[test]
fn noise_lines_produce_no_row() {
    for line in ["p", " p ", "End of register", "*** end OF REGISTER ***"] {
        assert!(is_noise(line), "{line:?}");
        assert!(RowTokenizer::default().tokenize(line).is_none());
    }
    assert!(!is_noise("p 12"));
}

#[test]
fn wider_gap_keeps_double_spaces_inside_columns() {
    let params = ScheduleParams {
        min_column_gap: 3,
        ..Default::default()
    };
    let tok = RowTokenizer::from_params(&params);
    assert_eq!(
        tok.tokenize("Flat 3  Park Road   99 years").unwrap().row,
        Row::from_strs(["Flat 3  Park Road", "", "99 years", ""])
    );
}

#[test]
fn sequential_placement_is_configurable() {
    let tok = RowTokenizer::new(2, TwoChunkPlacement::Sequential);
    assert_eq!(
        tok.tokenize("  99 years").unwrap().row,
        Row::from_strs(["", "99 years", "", ""])
    );
}

#[test]
fn ambiguity_kinds() {
    let tok = RowTokenizer::default();
    assert_eq!(
        tok.tokenize("numbered 2").unwrap().ambiguity,
        Some(AmbiguityKind::SingleChunk)
    );
    assert_eq!(tok.tokenize("1  Plot A").unwrap().ambiguity, None);
    assert_eq!(
        tok.tokenize("a  b  c  d  e  f  g").unwrap().ambiguity,
        Some(AmbiguityKind::ExcessChunks(6))
    );
}
