/// Slider-merge tolerance in beats.
pub(crate) const SLIDER_TOLERANCE: f32 = 0.025;

/// Minimum length in beats of a note authored with a non-positive length.
pub(crate) const MIN_LENGTH: f32 = 0.015;

/// A note as it is stored in a chart file, measured in beats.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawNote {
    /// Onset in beats.
    pub onset: f32,
    /// Length in beats.
    pub length: f32,
    pub pitch_start: f32,
    pub pitch_end: f32,
    pub pitch_delta: f32,
}

impl RawNote {
    pub const fn new(
        onset: f32,
        length: f32,
        pitch_start: f32,
        pitch_end: f32,
        pitch_delta: f32,
    ) -> Self {
        Self {
            onset,
            length,
            pitch_start,
            pitch_end,
            pitch_delta,
        }
    }

    /// Create a [`RawNote`] from a row of a chart's note matrix.
    ///
    /// Rows are laid out as `[onset, length, pitch_start, pitch_delta,
    /// pitch_end]`.
    pub const fn from_row(row: [f32; 5]) -> Self {
        let [onset, length, pitch_start, pitch_delta, pitch_end] = row;

        Self::new(onset, length, pitch_start, pitch_end, pitch_delta)
    }

    /// Whether `next` starts close enough after this note ends to be merged
    /// with it.
    ///
    /// The comparison happens in beats so the result does not depend on the
    /// playback speed.
    pub fn is_slider_into(&self, next: &Self) -> bool {
        self.onset + self.length + SLIDER_TOLERANCE >= next.onset
    }

    pub(crate) fn is_finite(&self) -> Result<(), &'static str> {
        let Self {
            onset,
            length,
            pitch_start,
            pitch_end,
            pitch_delta,
        } = self;

        if !onset.is_finite() {
            Err("onset")
        } else if !length.is_finite() {
            Err("length")
        } else if !pitch_start.is_finite() {
            Err("pitch_start")
        } else if !pitch_end.is_finite() {
            Err("pitch_end")
        } else if !pitch_delta.is_finite() {
            Err("pitch_delta")
        } else {
            Ok(())
        }
    }
}

/// A note converted to seconds for a specific playback speed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Note {
    /// Index within the normalized note list; `0` is the synthetic lead-in.
    pub idx: usize,
    /// Onset in seconds.
    pub position: f32,
    /// Length in seconds.
    pub length: f32,
    pub pitch_start: f32,
    pub pitch_end: f32,
    pub pitch_delta: f32,
    /// Whether this note is merged with its successor.
    pub is_slider: bool,
}

impl Note {
    /// Lead-in note that is prepended to every normalized note list.
    pub const SYNTHETIC: Self = Self {
        idx: 0,
        position: 0.0,
        length: MIN_LENGTH,
        pitch_start: 0.0,
        pitch_end: 0.0,
        pitch_delta: 0.0,
        is_slider: false,
    };
}
