use std::f32::consts::E;

use crate::model::note::Note;

use super::{
    analytics::{DataVector, DataVectorAnalytics},
    formula::Blend,
};

/// Added to every skill rating so that trivial charts still contribute to the
/// star rating blend.
pub const RATING_FLOOR: f32 = 0.01;

/// Shortest song length in seconds considered for the song length
/// multiplier.
const MIN_SONG_LENGTH: f32 = 1.0;

/// Turns per-note values into skill and star ratings.
pub struct ChartRatingCalculator {
    blend: Blend,
    song_length_mult: f32,
}

impl ChartRatingCalculator {
    pub const fn new(blend: Blend, song_length_mult: f32) -> Self {
        Self {
            blend,
            song_length_mult,
        }
    }

    pub fn compute_analytics(&self, vectors: &[DataVector]) -> DataVectorAnalytics {
        DataVectorAnalytics::new(vectors, self.song_length_mult)
    }

    pub fn compute_skill_rating(analytics: &DataVectorAnalytics) -> f32 {
        analytics.perf_weighted_average + RATING_FLOOR
    }

    pub fn compute_star_rating(&self, aim_rating: f32, tap_rating: f32) -> f32 {
        self.blend.star_rating(aim_rating, tap_rating)
    }
}

/// Duration in seconds between the first real note and the last note.
///
/// Expects a normalized note list including the synthetic lead-in note.
pub fn song_length(notes: &[Note]) -> f32 {
    let length = match notes {
        [_, first, .., last] => last.position - first.position,
        _ => 0.0,
    };

    length.max(MIN_SONG_LENGTH)
}

/// Diminishing-returns curve that discounts short songs.
///
/// <https://www.desmos.com/calculator/sn1tqkq4gf>
pub fn song_length_multiplier(song_length: f32) -> f32 {
    ((song_length + 20.0) / 7.0).powf(-E * 0.14) + 0.675
}

#[cfg(test)]
mod tests {
    use crate::difficulty::formula::FormulaVersion;

    use super::*;

    fn note_at(position: f32) -> Note {
        Note {
            position,
            ..Note::SYNTHETIC
        }
    }

    #[test]
    fn short_lists_use_min_length() {
        assert!((song_length(&[Note::SYNTHETIC]) - 1.0).abs() < f32::EPSILON);
        assert!((song_length(&[Note::SYNTHETIC, note_at(30.0)]) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn length_skips_lead_in() {
        let notes = [Note::SYNTHETIC, note_at(2.0), note_at(5.0), note_at(12.0)];

        assert!((song_length(&notes) - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn multiplier_decreases_with_length() {
        let short = song_length_multiplier(1.0);
        let long = song_length_multiplier(300.0);

        assert!(short > long);
        assert!(long > 0.675);

        // (21 / 7) ^ (-e * 0.14) + 0.675
        assert!((short - (3.0_f32.powf(-E * 0.14) + 0.675)).abs() < 1e-6);
    }

    #[test]
    fn skill_rating_has_floor() {
        let calculator = ChartRatingCalculator::new(FormulaVersion::Latest.blend(), 1.0);
        let analytics = calculator.compute_analytics(&[]);

        let rating = ChartRatingCalculator::compute_skill_rating(&analytics);

        assert!((rating - RATING_FLOOR).abs() < f32::EPSILON);
    }

    #[test]
    fn star_rating_between_skills() {
        let calculator = ChartRatingCalculator::new(FormulaVersion::Latest.blend(), 1.0);
        let star = calculator.compute_star_rating(2.0, 6.0);

        assert!(star > 2.0 && star < 6.0);
    }
}
