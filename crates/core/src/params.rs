//! Extraction parameters.
//!
//! Contains ScheduleParams, the document-layout constants that tell the
//! pipeline where the schedule lives and how its columns are spaced.

use crate::error::{Result, ScheduleError};

/// Rectangle in page units with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClipRect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

impl std::str::FromStr for ClipRect {
    type Err = ScheduleError;

    /// Parse `left,top,right,bottom`.
    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<f32> = s
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f32>()
                    .map_err(|_| ScheduleError::InvalidParams(format!("invalid clip value: {v}")))
            })
            .collect::<Result<_>>()?;
        match values.as_slice() {
            &[left, top, right, bottom] => Ok(Self::new(left, top, right, bottom)),
            _ => Err(ScheduleError::InvalidParams(format!(
                "clip needs 4 values (left,top,right,bottom), got {}",
                values.len()
            ))),
        }
    }
}

/// Where the two values of a two-column line are placed.
///
/// Extracted lines that only carry two values are ambiguous: they could
/// belong to any pair of columns. The rule that fits a document depends on
/// its layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TwoChunkPlacement {
    /// Without a leading gap the values are the plan reference and the
    /// term; with one, the single value is placed in the term column.
    #[default]
    LeadingGap,
    /// Values fill the first two positions in order.
    Sequential,
}

/// Parameters for schedule extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleParams {
    /// Region of each page holding the schedule table.
    pub clip: ClipRect,

    /// Zero-indexed page the schedule starts on.
    pub start_page: usize,

    /// Rows of front-matter preceding the first entry.
    pub skip_rows: usize,

    /// Consecutive spaces that separate two columns.
    pub min_column_gap: usize,

    /// Placement rule for two-column lines.
    pub two_chunk: TwoChunkPlacement,
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self {
            clip: ClipRect::new(50.0, 116.0, 600.0, 812.0),
            start_page: 3,
            skip_rows: 24,
            min_column_gap: 2,
            two_chunk: TwoChunkPlacement::LeadingGap,
        }
    }
}

impl ScheduleParams {
    /// Creates parameters with the specified values.
    ///
    /// Fails if the clip rectangle is empty or the column gap is zero.
    pub fn new(
        clip: ClipRect,
        start_page: usize,
        skip_rows: usize,
        min_column_gap: usize,
        two_chunk: TwoChunkPlacement,
    ) -> Result<Self> {
        let params = Self {
            clip,
            start_page,
            skip_rows,
            min_column_gap,
            two_chunk,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clip.width() <= 0.0 || self.clip.height() <= 0.0 {
            return Err(ScheduleError::InvalidParams(format!(
                "clip rectangle is empty: {:?}",
                self.clip
            )));
        }
        if self.min_column_gap == 0 {
            return Err(ScheduleError::InvalidParams(
                "column gap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
