use crate::model::speed::{speed_to_index, GridPosition, BASE_SPEED_IDX, SPEED_COUNT};

use super::{
    analytics::{sort_by_difficulty, DataVector, DataVectorAnalytics},
    formula::FormulaVersion,
    rating::ChartRatingCalculator,
    skills::{NumericDivergence, SkillVectors},
};

/// Per-note values and the resulting rating of one skill at one speed.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillPerformance {
    /// Values in note order.
    pub vectors: Box<[DataVector]>,
    /// Values sorted ascending by [`DataVector::difficulty`].
    pub sorted: Box<[DataVector]>,
    pub analytics: DataVectorAnalytics,
    pub rating: f32,
}

impl SkillPerformance {
    fn new(vectors: Vec<DataVector>, calculator: &ChartRatingCalculator) -> Self {
        let sorted = sort_by_difficulty(&vectors);
        let analytics = calculator.compute_analytics(&vectors);
        let rating = ChartRatingCalculator::compute_skill_rating(&analytics);

        Self {
            vectors: vectors.into_boxed_slice(),
            sorted,
            analytics,
            rating,
        }
    }
}

/// Ratings of a chart at one playback speed.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedPerformance {
    pub speed: f32,
    pub aim: SkillPerformance,
    pub tap: SkillPerformance,
    pub star_rating: f32,
}

impl SpeedPerformance {
    pub(crate) fn new(speed: f32, vectors: SkillVectors, calculator: &ChartRatingCalculator) -> Self {
        let SkillVectors { aim, tap } = vectors;

        let aim = SkillPerformance::new(aim, calculator);
        let tap = SkillPerformance::new(tap, calculator);
        let star_rating = calculator.compute_star_rating(aim.rating, tap.rating);

        Self {
            speed,
            aim,
            tap,
            star_rating,
        }
    }
}

/// Outcome of a single speed's calculation.
pub type SpeedResult = Result<SpeedPerformance, NumericDivergence>;

/// Ratings of a chart for every playback speed on the grid.
///
/// A speed whose calculation diverged is unavailable and all queries that
/// depend on it return `None`. A rating of `0.0` on the other hand is a valid
/// result.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPerformances {
    pub(crate) version: FormulaVersion,
    pub(crate) lite: bool,
    pub(crate) song_length: f32,
    pub(crate) song_length_mult: f32,
    pub(crate) slots: [Option<SpeedResult>; SPEED_COUNT],
}

impl ChartPerformances {
    /// Which formula version produced these ratings.
    pub const fn version(&self) -> FormulaVersion {
        self.version
    }

    /// Whether only the `1.0` speed preview was calculated.
    pub const fn is_lite(&self) -> bool {
        self.lite
    }

    /// Seconds between the first and last note at `1.0` speed.
    pub const fn song_length(&self) -> f32 {
        self.song_length
    }

    /// Short song discount applied to all weighted averages.
    pub const fn song_length_mult(&self) -> f32 {
        self.song_length_mult
    }

    /// Outcome of the calculation for the grid speed at `idx`.
    ///
    /// In lite mode, only index `0` is populated and holds the `1.0` speed
    /// preview.
    pub fn slot(&self, idx: usize) -> Option<&SpeedResult> {
        self.slots.get(idx)?.as_ref()
    }

    /// Ratings for the grid speed at `idx` if they are available.
    ///
    /// Always `None` in lite mode.
    pub fn grid(&self, idx: usize) -> Option<&SpeedPerformance> {
        if self.lite {
            return None;
        }

        self.slot(idx)?.as_ref().ok()
    }

    /// The `1.0` speed ratings, regardless of lite mode.
    pub fn preview(&self) -> Option<&SpeedPerformance> {
        let idx = if self.lite { 0 } else { BASE_SPEED_IDX };

        self.slot(idx)?.as_ref().ok()
    }

    /// Star rating of the grid speed at or below `speed`.
    pub fn star_rating(&self, speed: f32) -> Option<f32> {
        self.grid(speed_to_index(speed)).map(|perf| perf.star_rating)
    }

    pub fn aim_rating(&self, speed: f32) -> Option<f32> {
        self.grid(speed_to_index(speed)).map(|perf| perf.aim.rating)
    }

    pub fn tap_rating(&self, speed: f32) -> Option<f32> {
        self.grid(speed_to_index(speed)).map(|perf| perf.tap.rating)
    }

    /// Weighted average of the aim values without the rating floor.
    pub fn aim_performance(&self, speed: f32) -> Option<f32> {
        self.grid(speed_to_index(speed))
            .map(|perf| perf.aim.analytics.perf_weighted_average)
    }

    /// Weighted average of the tap values without the rating floor.
    pub fn tap_performance(&self, speed: f32) -> Option<f32> {
        self.grid(speed_to_index(speed))
            .map(|perf| perf.tap.analytics.perf_weighted_average)
    }

    /// Star rating at `speed`, interpolated between grid speeds.
    ///
    /// `speed` is clamped to the grid's range.
    pub fn diff_rating(&self, speed: f32) -> Option<f32> {
        GridPosition::new(speed).interpolate(|idx| self.grid(idx).map(|perf| perf.star_rating))
    }

    /// Star ratings of all grid speeds.
    ///
    /// Returns `None` if any speed is unavailable.
    pub fn star_ratings(&self) -> Option<[f32; SPEED_COUNT]> {
        let mut ratings = [0.0; SPEED_COUNT];

        for (idx, rating) in ratings.iter_mut().enumerate() {
            *rating = self.grid(idx)?.star_rating;
        }

        Some(ratings)
    }

    /// Grid speeds whose calculation diverged.
    pub fn diverged(&self) -> impl Iterator<Item = &NumericDivergence> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref()?.as_ref().err())
    }
}
