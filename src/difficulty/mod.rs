use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    model::{
        chart::{Chart, ChartError, ChartMetadata},
        note::Note,
        speed::{BASE_SPEED_IDX, GAME_SPEEDS, SPEED_COUNT},
    },
    score::{compute_max_score, ScoreTable},
    selection::CancellationToken,
};

use self::{
    attributes::{SpeedPerformance, SpeedResult},
    formula::{FormulaVersion, Latest, Legacy},
    object::NoteNormalizer,
    rating::{song_length, song_length_multiplier, ChartRatingCalculator},
    skills::compute_channels,
};

pub use self::{attributes::ChartPerformances, skills::NumericDivergence};

pub mod analytics;
pub mod attributes;
pub mod dynamic;
pub mod formula;
pub mod object;
pub mod rating;
pub mod skills;

/// Reasons why a chart calculation produced no attributes.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum CalculationError {
    #[error("malformed chart")]
    Malformed(#[from] ChartError),
    #[error("calculation was cancelled")]
    Cancelled,
}

/// Difficulty calculator of a chart.
///
/// # Example
///
/// ```
/// use toot_pp::{Chart, Difficulty, FormulaVersion, RawNote};
///
/// let chart = Chart::new(
///     140.0,
///     vec![
///         RawNote::new(0.0, 0.5, 0.0, 0.0, 0.0),
///         RawNote::new(1.0, 0.5, 50.0, 50.0, 0.0),
///         RawNote::new(2.0, 0.5, -50.0, -50.0, 0.0),
///     ],
/// );
///
/// let attrs = Difficulty::new()
///     .version(FormulaVersion::Latest)
///     .calculate(&chart)
///     .unwrap();
///
/// let stars = attrs.performances.diff_rating(1.1);
/// let max_score = attrs.score.max_score;
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Difficulty {
    version: FormulaVersion,
    lite: bool,
    cancellation: Option<CancellationToken>,
}

impl Difficulty {
    /// Create a new difficulty calculator with the latest formula version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify which version of the rating formula to use.
    pub fn version(self, version: FormulaVersion) -> Self {
        Self { version, ..self }
    }

    /// Only calculate a preview rating at `1.0` speed.
    ///
    /// The preview is accessible through [`ChartPerformances::preview`]; grid
    /// queries return `None`.
    pub fn lite(self, lite: bool) -> Self {
        Self { lite, ..self }
    }

    /// Abandon the calculation once `token` is cancelled.
    pub fn cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self
        }
    }

    pub const fn get_version(&self) -> FormulaVersion {
        self.version
    }

    pub const fn get_lite(&self) -> bool {
        self.lite
    }

    /// Perform the difficulty calculation.
    ///
    /// Speeds are processed on the current rayon thread pool so wrapping this
    /// call in [`rayon::ThreadPool::install`] controls where they run.
    pub fn calculate(&self, chart: &Chart) -> Result<ChartAttributes, CalculationError> {
        let start = Instant::now();

        self.check_cancelled()?;

        let normalizer = NoteNormalizer::new(chart)?;
        let base_notes = normalizer.notes_at(GAME_SPEEDS[BASE_SPEED_IDX]);
        let song_length = song_length(&base_notes);
        let song_length_mult = song_length_multiplier(song_length);

        let sequences = if self.lite {
            vec![(GAME_SPEEDS[BASE_SPEED_IDX], base_notes)]
        } else {
            GAME_SPEEDS
                .iter()
                .map(|&speed| (speed, normalizer.notes_at(speed)))
                .collect()
        };

        let calculator = ChartRatingCalculator::new(self.version.blend(), song_length_mult);
        let slots = self.calculate_speeds(&sequences, &calculator)?;

        let score = compute_max_score(normalizer.sorted(), chart.tempo);

        self.check_cancelled()?;

        let calculation_time = start.elapsed();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            chart = %chart.metadata.track_ref,
            elapsed = ?calculation_time,
            "Calculated chart"
        );

        let performances = ChartPerformances {
            version: self.version,
            lite: self.lite,
            song_length,
            song_length_mult,
            slots,
        };

        Ok(ChartAttributes {
            performances,
            score,
            calculation_time,
            metadata: chart.metadata.clone(),
        })
    }

    /// Calculate each `(speed, notes)` sequence in parallel.
    ///
    /// The result at index `i` belongs to the `i`th sequence. Divergence of
    /// one sequence does not affect the others.
    fn calculate_speeds(
        &self,
        sequences: &[(f32, Box<[Note]>)],
        calculator: &ChartRatingCalculator,
    ) -> Result<[Option<SpeedResult>; SPEED_COUNT], CalculationError> {
        let results: Vec<Option<SpeedResult>> = sequences
            .par_iter()
            .map(|(speed, notes)| {
                if self.is_cancelled() {
                    return None;
                }

                Some(self.calculate_speed(notes, *speed, calculator))
            })
            .collect();

        self.check_cancelled()?;

        let mut slots: [Option<SpeedResult>; SPEED_COUNT] = Default::default();

        for (slot, res) in slots.iter_mut().zip(results) {
            *slot = res;
        }

        Ok(slots)
    }

    fn calculate_speed(
        &self,
        notes: &[Note],
        speed: f32,
        calculator: &ChartRatingCalculator,
    ) -> SpeedResult {
        let res = match self.version {
            FormulaVersion::Latest => compute_channels::<Latest>(notes, speed),
            FormulaVersion::Legacy => compute_channels::<Legacy>(notes, speed),
        };

        match res {
            Ok(vectors) => Ok(SpeedPerformance::new(speed, vectors, calculator)),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(speed = err.speed, note = err.note, "Strain diverged");

                Err(err)
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn check_cancelled(&self) -> Result<(), CalculationError> {
        if self.is_cancelled() {
            Err(CalculationError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Everything calculated for a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartAttributes {
    pub performances: ChartPerformances,
    /// Maximum score at the chart's base tempo.
    pub score: ScoreTable,
    /// Time it took to calculate the attributes.
    pub calculation_time: Duration,
    pub metadata: ChartMetadata,
}

impl ChartAttributes {
    /// Amount of notes after merging sliders.
    pub fn slider_count(&self) -> usize {
        self.score.unit_count()
    }
}
