use crate::model::{
    chart::{beats_to_seconds, Chart, ChartError},
    note::{Note, RawNote, MIN_LENGTH},
};

/// Convert raw notes into notes measured in seconds at the given playback
/// speed.
///
/// The output starts with [`Note::SYNTHETIC`] followed by one note per input
/// note in onset order.
pub fn normalize(raw: &[RawNote], tempo: f32, speed: f32) -> Result<Vec<Note>, ChartError> {
    let chart = Chart::new(tempo, raw.to_vec());
    let normalizer = NoteNormalizer::new(&chart)?;

    Ok(normalizer.notes_at(speed).into_vec())
}

/// Sorted notes of a chart together with their speed-invariant slider flags.
///
/// Notes for each playback speed are derived from the same sorted list so
/// that slider classification is shared between speeds.
#[derive(Clone, Debug)]
pub struct NoteNormalizer {
    tempo: f32,
    sorted: Vec<RawNote>,
    sliders: Vec<bool>,
}

impl NoteNormalizer {
    pub fn new(chart: &Chart) -> Result<Self, ChartError> {
        let sorted = chart.sorted_notes()?;

        let sliders = (0..sorted.len())
            .map(|i| {
                sorted
                    .get(i + 1)
                    .is_some_and(|next| sorted[i].is_slider_into(next))
            })
            .collect();

        Ok(Self {
            tempo: chart.tempo,
            sorted,
            sliders,
        })
    }

    /// The chart's notes in onset order.
    pub fn sorted(&self) -> &[RawNote] {
        &self.sorted
    }

    /// Whether the sorted note at `idx` merges into its successor.
    pub fn is_slider(&self, idx: usize) -> bool {
        self.sliders.get(idx).copied().unwrap_or(false)
    }

    /// Amount of notes after merging sliders.
    pub fn scoring_unit_count(&self) -> usize {
        self.sliders.iter().filter(|is_slider| !**is_slider).count()
    }

    /// Notes in seconds for the given playback speed.
    pub fn notes_at(&self, speed: f32) -> Box<[Note]> {
        let bpm = self.tempo * speed;

        let notes = self
            .sorted
            .iter()
            .zip(self.sliders.iter())
            .enumerate()
            .map(|(i, (raw, &is_slider))| {
                let length = if raw.length <= 0.0 {
                    MIN_LENGTH
                } else {
                    raw.length
                };

                Note {
                    idx: i + 1,
                    position: beats_to_seconds(raw.onset, bpm),
                    length: beats_to_seconds(length, bpm),
                    pitch_start: raw.pitch_start,
                    pitch_end: raw.pitch_end,
                    pitch_delta: raw.pitch_delta,
                    is_slider,
                }
            });

        std::iter::once(Note::SYNTHETIC).chain(notes).collect()
    }
}
