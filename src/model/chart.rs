use std::cmp::Ordering;

use super::note::RawNote;

/// A parsed chart as handed over by a chart loader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    /// Beats per minute.
    pub tempo: f32,
    /// Notes in no particular order.
    pub notes: Vec<RawNote>,
    /// Descriptive data that is passed through untouched.
    pub metadata: ChartMetadata,
}

/// Descriptive chart data without influence on any calculation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartMetadata {
    pub track_ref: String,
    pub name: String,
    pub short_name: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub difficulty: String,
    pub year: String,
}

impl Chart {
    pub fn new(tempo: f32, notes: Vec<RawNote>) -> Self {
        Self {
            tempo,
            notes,
            metadata: ChartMetadata::default(),
        }
    }

    /// Create a [`Chart`] from a note matrix.
    ///
    /// See [`RawNote::from_row`] for the row layout.
    pub fn from_rows(tempo: f32, rows: &[[f32; 5]]) -> Self {
        let notes = rows.iter().copied().map(RawNote::from_row).collect();

        Self::new(tempo, notes)
    }

    /// Attach metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: ChartMetadata) -> Self {
        self.metadata = metadata;

        self
    }

    /// Check that the chart can be processed.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(ChartError::InvalidTempo(self.tempo));
        }

        if self.notes.is_empty() {
            return Err(ChartError::NoNotes);
        }

        for (index, note) in self.notes.iter().enumerate() {
            note.is_finite()
                .map_err(|field| ChartError::NonFinite { index, field })?;
        }

        Ok(())
    }

    /// Validate the chart and return its notes sorted by onset.
    ///
    /// Sorting is stable so notes with the same onset keep their input order.
    pub fn sorted_notes(&self) -> Result<Vec<RawNote>, ChartError> {
        self.validate()?;

        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| a.onset.partial_cmp(&b.onset).unwrap_or(Ordering::Equal));

        if let Some(index) = notes
            .windows(2)
            .position(|window| window[0].onset > window[1].onset)
        {
            return Err(ChartError::NonMonotonicOnset { index: index + 1 });
        }

        Ok(notes)
    }

    /// Convert beats into seconds at the given playback speed.
    pub fn beats_to_seconds(&self, beats: f32, speed: f32) -> f32 {
        beats_to_seconds(beats, self.tempo * speed)
    }
}

pub(crate) fn beats_to_seconds(beats: f32, bpm: f32) -> f32 {
    60.0 / bpm * beats
}

/// Reasons why a [`Chart`] cannot be processed.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    #[error("chart contains no notes")]
    NoNotes,
    #[error("tempo must be positive and finite, got {0}")]
    InvalidTempo(f32),
    #[error("note {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
    #[error("note {index} starts before its predecessor")]
    NonMonotonicOnset { index: usize },
}
