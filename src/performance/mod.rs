use crate::{
    difficulty::ChartPerformances,
    model::{
        mods::GameMods,
        speed::{clamp_speed, lerp_by_speed, SPEED_COUNT},
    },
    util::difficulty::fast_pow,
};

pub use self::multiplier::{accuracy_multiplier, EZ_MULTIPLIERS, MULTIPLIERS};
pub use crate::util::interpolation::InterpolationTable;

mod multiplier;

/// Performance value ("TT") of a chart with the given star rating, before
/// accounting for accuracy.
pub fn base_tt(star_rating: f32) -> f32 {
    0.5 * fast_pow(f64::from(star_rating), 2) + 7.0 * star_rating + 0.05
}

/// Performance value of a play from per-speed star ratings alone.
///
/// Unlike [`ChartPerformance`], completion of the play is not considered.
pub fn tt_from_star_ratings(
    star_ratings: &[f32; SPEED_COUNT],
    speed: f32,
    accuracy: f32,
    mods: &GameMods,
) -> f32 {
    base_tt(lerp_by_speed(star_ratings, speed)) * accuracy_multiplier(accuracy, mods)
}

/// Performance calculator of a play on a chart.
///
/// # Example
///
/// ```
/// use toot_pp::{Chart, ChartPerformance, Difficulty, RawNote};
///
/// let chart = Chart::new(
///     140.0,
///     (0..16)
///         .map(|i| RawNote::new(i as f32, 0.5, i as f32 * 10.0, i as f32 * 10.0, 0.0))
///         .collect(),
/// );
///
/// let attrs = Difficulty::new().calculate(&chart).unwrap();
///
/// let perf = ChartPerformance::new(&attrs.performances)
///     .speed(1.25)
///     .accuracy(0.97)
///     .passed(14, 16)
///     .mods("HD")
///     .calculate()
///     .unwrap();
///
/// println!("{} TT", perf.tt);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct ChartPerformance<'a> {
    performances: &'a ChartPerformances,
    speed: f32,
    accuracy: f32,
    passed: Option<(u32, u32)>,
    mods: GameMods,
}

impl<'a> ChartPerformance<'a> {
    pub const fn new(performances: &'a ChartPerformances) -> Self {
        Self {
            performances,
            speed: 1.0,
            accuracy: 1.0,
            passed: None,
            mods: GameMods::DEFAULT,
        }
    }

    /// Playback speed of the play. Clamped between `0.5` and `2.0`.
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = clamp_speed(speed);

        self
    }

    /// Accuracy between `0.0` and `1.0`.
    pub fn accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;

        self
    }

    /// Amount of hit notes out of the chart's notes for partial plays.
    ///
    /// If not specified, the play is considered complete.
    pub const fn passed(mut self, hit_count: u32, note_count: u32) -> Self {
        self.passed = Some((hit_count, note_count));

        self
    }

    pub fn mods(mut self, mods: impl Into<GameMods>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Calculate the performance value.
    ///
    /// Returns `None` if the ratings required for the play's speed are
    /// unavailable.
    pub fn calculate(self) -> Option<PerformanceAttributes> {
        let percent = match self.passed {
            Some((_, 0)) => 0.0,
            Some((hit_count, note_count)) => hit_count as f32 / note_count as f32,
            None => 1.0,
        };

        let star_rating =
            self.performances
                .dynamic_diff_rating(self.speed, percent, &self.mods)?;

        let base_tt = base_tt(star_rating);
        let multiplier = accuracy_multiplier(self.accuracy, &self.mods);

        Some(PerformanceAttributes {
            star_rating,
            base_tt,
            accuracy_multiplier: multiplier,
            tt: base_tt * multiplier,
        })
    }
}

/// The result of a performance calculation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PerformanceAttributes {
    /// Dynamic star rating of the play.
    pub star_rating: f32,
    /// Performance value before accounting for accuracy.
    pub base_tt: f32,
    pub accuracy_multiplier: f32,
    /// Final performance value.
    pub tt: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tt_curve() {
        assert!((base_tt(0.0) - 0.05).abs() < f32::EPSILON);
        assert!((base_tt(2.0) - 16.05).abs() < 1e-5);
        assert!(base_tt(5.0) > base_tt(4.0));
    }

    #[test]
    fn tt_from_ratings() {
        let ratings = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
        let tt = tt_from_star_ratings(&ratings, 1.0, 1.0, &GameMods::default());

        assert!((tt - base_tt(2.0) * 40.2).abs() < 1e-3);
    }

    #[test]
    fn easy_lowers_tt() {
        let ratings = [2.0; SPEED_COUNT];
        let nomod = tt_from_star_ratings(&ratings, 1.0, 0.98, &GameMods::default());
        let easy = tt_from_star_ratings(&ratings, 1.0, 0.98, &GameMods::from("EZ"));

        assert!(easy < nomod);
    }
}
