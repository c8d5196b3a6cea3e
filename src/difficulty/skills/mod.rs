use std::marker::PhantomData;

use crate::{
    difficulty::{analytics::DataVector, formula::RatingFormula},
    model::note::Note,
};

pub use self::endurance::Endurance;

mod endurance;

/// Per-note values of both skills for one playback speed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillVectors {
    pub aim: Vec<DataVector>,
    pub tap: Vec<DataVector>,
}

/// A strain or endurance value stopped being finite.
///
/// The affected speed is unavailable; sibling speeds are unaffected.
#[derive(Copy, Clone, Debug, thiserror::Error, PartialEq)]
#[error("strain diverged at note {note} for speed {speed}")]
pub struct NumericDivergence {
    /// Playback speed of the note list.
    pub speed: f32,
    /// Index of the note in the normalized note list.
    pub note: usize,
}

/// Calculate aim and tap values of every note.
///
/// Notes must be normalized for the given playback speed.
pub fn compute_channels<F: RatingFormula>(
    notes: &[Note],
    speed: f32,
) -> Result<SkillVectors, NumericDivergence> {
    let mut skills = Skills::<F>::new(notes.len());

    for idx in 0..notes.len() {
        skills
            .process(idx, notes)
            .map_err(|note| NumericDivergence { speed, note })?;
    }

    Ok(skills.into_vectors())
}

/// Strain accumulated over the window of a single note.
#[derive(Copy, Clone, Debug, Default)]
struct WindowStrain {
    aim: f32,
    tap: f32,
    weight_sum: f32,
}

struct Skills<F> {
    aim_endurance: Endurance,
    tap_endurance: Endurance,
    vectors: SkillVectors,
    _formula: PhantomData<F>,
}

impl<F: RatingFormula> Skills<F> {
    fn new(capacity: usize) -> Self {
        Self {
            aim_endurance: Endurance::new(F::AIM_THRESHOLD_MULTIPLIER),
            tap_endurance: Endurance::new(F::TAP_THRESHOLD_MULTIPLIER),
            vectors: SkillVectors {
                aim: Vec::with_capacity(capacity),
                tap: Vec::with_capacity(capacity),
            },
            _formula: PhantomData,
        }
    }

    /// Push the values of the note at `idx`.
    ///
    /// On divergence, the index is returned as error.
    fn process(&mut self, idx: usize, notes: &[Note]) -> Result<(), usize> {
        let curr = &notes[idx];
        let window = self.window_strain(idx, notes);

        let aim_strain = F::compress(window.aim) / F::AIM_DIV;
        let tap_strain = F::compress(window.tap) / F::TAP_DIV;

        if let Some(prev) = idx.checked_sub(1).map(|prev_idx| &notes[prev_idx]) {
            let divider = Endurance::divider(curr.position - prev.position);
            self.aim_endurance.decay(aim_strain, divider);
            self.tap_endurance.decay(tap_strain, divider);
        }

        let values = [
            aim_strain,
            self.aim_endurance.value(),
            tap_strain,
            self.tap_endurance.value(),
        ];

        if values.iter().any(|value| !value.is_finite()) {
            return Err(idx);
        }

        self.vectors.aim.push(DataVector::new(
            curr.position,
            aim_strain,
            self.aim_endurance.value(),
            window.weight_sum,
        ));

        self.vectors.tap.push(DataVector::new(
            curr.position,
            tap_strain,
            self.tap_endurance.value(),
            window.weight_sum,
        ));

        Ok(())
    }

    /// Scan backwards from the note at `idx` and accumulate strain of each
    /// considered `(prev, next)` pair.
    ///
    /// Endurance is accumulated along the way.
    fn window_strain(&mut self, idx: usize, notes: &[Note]) -> WindowStrain {
        let curr = &notes[idx];
        let mut strain = WindowStrain::default();
        let mut considered = 0;

        // Exclusive upper bound of the next `prev` index
        let mut cursor = idx;

        while let Some(mut prev_idx) = cursor.checked_sub(1) {
            let in_range = (curr.position - notes[prev_idx].position).abs() <= F::MAX_DIST
                || idx - prev_idx <= 2;

            if considered >= F::WINDOW || !in_range {
                break;
            }

            let mut prev = &notes[prev_idx];
            let mut next = &notes[prev_idx + 1];

            if prev.position >= next.position {
                break;
            }

            let weight = F::WEIGHTS[considered];
            considered += 1;
            strain.weight_sum += weight;

            let mut length_sum = prev.length;
            let mut delta_slide_sum = F::cheese_adjusted(prev.pitch_delta);
            let mut exhausted = false;

            while prev.is_slider {
                if prev_idx == 0 {
                    exhausted = true;

                    break;
                }

                prev_idx -= 1;
                prev = &notes[prev_idx];
                next = &notes[prev_idx + 1];

                if prev.pitch_delta == 0.0 {
                    length_sum += prev.length * F::FLAT_SLIDER_LENGTH_MULTIPLIER;
                } else {
                    length_sum += prev.length;
                    delta_slide_sum += F::cheese_adjusted(prev.pitch_delta);
                }
            }

            let delta_time = next.position - prev.position;

            if delta_slide_sum != 0.0 {
                strain.aim += F::acc_strain(length_sum, delta_slide_sum, weight) / F::ACC_DIV;
                self.aim_endurance
                    .add(F::acc_endurance(length_sum, delta_slide_sum, weight));
            }

            let aim_distance = (next.pitch_start - prev.pitch_end).abs();

            if aim_distance != 0.0 || delta_slide_sum != 0.0 {
                strain.aim += F::aim_strain(aim_distance, weight, delta_time);
                self.aim_endurance
                    .add(F::aim_endurance(aim_distance, weight, delta_time));
            }

            strain.tap += F::tap_strain(delta_time, weight, aim_distance);
            self.tap_endurance
                .add(F::tap_endurance(delta_time, weight, aim_distance));

            if exhausted {
                break;
            }

            cursor = prev_idx;
        }

        strain
    }

    fn into_vectors(self) -> SkillVectors {
        self.vectors
    }
}
