use crate::model::{mods::GameMods, speed::GridPosition};

use super::{
    analytics::{DataVector, DataVectorAnalytics},
    attributes::{ChartPerformances, SkillPerformance, SpeedPerformance},
    rating::RATING_FLOOR,
};

/// Completion at which the fraction of unlocked notes switches slopes.
const MID_PERCENT: f32 = 0.5;

/// Fraction of notes unlocked at [`MID_PERCENT`].
const MID_FRACTION: f32 = 0.05;

/// Map a completion percentage onto the fraction of the easiest notes that
/// are considered.
///
/// Low completion only unlocks few of the easiest notes while the upper half
/// of completion unlocks the bulk of the chart.
pub fn map_percent_to_fraction(percent: f32) -> f32 {
    if percent <= MID_PERCENT {
        percent * (MID_FRACTION / MID_PERCENT)
    } else {
        (percent - MID_PERCENT) * ((1.0 - MID_FRACTION) / (1.0 - MID_PERCENT)) + MID_FRACTION
    }
}

/// Rating of a skill when only the easiest notes up to `percent` completion
/// are considered.
///
/// `sorted` must be sorted ascending by [`DataVector::difficulty`]. Returns
/// `0.0` for lists of at most one value or non-positive completion.
pub fn projected_skill_rating(sorted: &[DataVector], percent: f32, song_length_mult: f32) -> f32 {
    if sorted.len() <= 1 || percent <= 0.0 {
        return 0.0;
    }

    let count = sorted.len() as f32;
    let max_range = (count * map_percent_to_fraction(percent)).clamp(1.0, count) as usize;

    let analytics = DataVectorAnalytics::new(&sorted[..max_range], song_length_mult);

    analytics.perf_weighted_average + RATING_FLOOR
}

impl ChartPerformances {
    /// Star rating at `speed` for a play that reached `percent` completion
    /// under the given mods.
    ///
    /// `speed` is clamped to the grid's range and `percent` to `[0, 1]`.
    /// Returns `None` if a required grid speed is unavailable.
    pub fn dynamic_diff_rating(&self, speed: f32, percent: f32, mods: &GameMods) -> Option<f32> {
        let position = GridPosition::new(speed);

        let aim_rating = self.dynamic_skill_rating(position, percent, |perf| &perf.aim)?;
        let tap_rating = self.dynamic_skill_rating(position, percent, |perf| &perf.tap)?;

        if aim_rating == 0.0 && tap_rating == 0.0 {
            return Some(0.0);
        }

        let (aim_mult, tap_mult) = if mods.is_neutral() {
            (1.0, 1.0)
        } else {
            self.version.modifiers().multipliers(mods)
        };

        let rating = self
            .version
            .blend()
            .weighted(aim_rating * aim_mult, tap_rating * tap_mult);

        Some(rating)
    }

    /// Aim rating at `speed` for a play that reached `percent` completion.
    pub fn dynamic_aim_rating(&self, speed: f32, percent: f32) -> Option<f32> {
        self.dynamic_skill_rating(GridPosition::new(speed), percent, |perf| &perf.aim)
    }

    /// Tap rating at `speed` for a play that reached `percent` completion.
    pub fn dynamic_tap_rating(&self, speed: f32, percent: f32) -> Option<f32> {
        self.dynamic_skill_rating(GridPosition::new(speed), percent, |perf| &perf.tap)
    }

    fn dynamic_skill_rating(
        &self,
        position: GridPosition,
        percent: f32,
        skill: fn(&SpeedPerformance) -> &SkillPerformance,
    ) -> Option<f32> {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.min(1.0)
        };

        position.interpolate(|idx| {
            let sorted = &skill(self.grid(idx)?).sorted;

            Some(projected_skill_rating(
                sorted,
                percent,
                self.song_length_mult,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(count: usize) -> Vec<DataVector> {
        (0..count)
            .map(|i| DataVector::new(i as f32, i as f32 * 0.1, 0.0, 1.0))
            .collect()
    }

    #[test]
    fn fraction_breakpoints() {
        assert!(map_percent_to_fraction(0.0).abs() < f32::EPSILON);
        assert!((map_percent_to_fraction(0.5) - 0.05).abs() < 1e-6);
        assert!((map_percent_to_fraction(0.75) - 0.525).abs() < 1e-6);
        assert!((map_percent_to_fraction(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn full_completion_uses_every_note() {
        let sorted = ascending(50);
        let full = DataVectorAnalytics::new(&sorted, 0.9).perf_weighted_average + RATING_FLOOR;

        assert!((projected_skill_rating(&sorted, 1.0, 0.9) - full).abs() < 1e-5);
    }

    #[test]
    fn nothing_to_project() {
        assert!(projected_skill_rating(&[], 1.0, 1.0).abs() < f32::EPSILON);
        assert!(projected_skill_rating(&ascending(1), 1.0, 1.0).abs() < f32::EPSILON);
        assert!(projected_skill_rating(&ascending(10), 0.0, 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn at_least_one_note() {
        let sorted = ascending(10);
        let first = DataVectorAnalytics::new(&sorted[..1], 1.0).perf_weighted_average;

        let rating = projected_skill_rating(&sorted, 0.01, 1.0);

        assert!((rating - (first + RATING_FLOOR)).abs() < 1e-6);
    }

    #[test]
    fn more_completion_is_harder() {
        let sorted = ascending(200);
        let mut prev = 0.0;

        for step in 1..=20 {
            let rating = projected_skill_rating(&sorted, step as f32 / 20.0, 1.0);
            assert!(rating >= prev);
            prev = rating;
        }
    }
}
