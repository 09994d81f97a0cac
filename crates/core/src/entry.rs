//! Schedule entries and the JSON document they are written to.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// Value of `EntryType` for every entry.
pub const ENTRY_TYPE: &str = "Schedule of Notices of Leases";

/// Value of `scheduleType` in the output document.
pub const SCHEDULE_TYPE: &str = "SCHEDULE OF NOTICES OF LEASE";

/// Column text accumulated for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryText {
    pub registration_date_and_plan_ref: String,
    pub property_description: String,
    pub lease_date_and_term: String,
    pub lessee_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl EntryText {
    pub(crate) fn trim_all(&mut self) {
        trim_in_place(&mut self.registration_date_and_plan_ref);
        trim_in_place(&mut self.property_description);
        trim_in_place(&mut self.lease_date_and_term);
        trim_in_place(&mut self.lessee_title);
        if let Some(note) = self.note.as_mut() {
            trim_in_place(note);
        }
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

/// One lease registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entry {
    pub entry_number: String,
    /// Reserved; the register layout carries no separate entry date.
    pub entry_date: String,
    pub entry_type: String,
    pub entry_text: EntryText,
}

impl Entry {
    pub fn new(entry_number: impl Into<String>, entry_text: EntryText) -> Self {
        Self {
            entry_number: entry_number.into(),
            entry_date: String::new(),
            entry_type: ENTRY_TYPE.to_string(),
            entry_text,
        }
    }
}

/// Body of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBody {
    #[serde(rename = "scheduleType")]
    pub schedule_type: String,
    #[serde(rename = "scheduleEntry")]
    pub schedule_entry: Vec<Entry>,
}

/// The output document: `{"leaseschedule": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseSchedule {
    pub leaseschedule: ScheduleBody,
}

impl LeaseSchedule {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            leaseschedule: ScheduleBody {
                schedule_type: SCHEDULE_TYPE.to_string(),
                schedule_entry: entries,
            },
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.leaseschedule.schedule_entry
    }

    /// Write the document as JSON indented by four spaces.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
