use std::cmp::Ordering;

use crate::model::{chart::beats_to_seconds, note::RawNote};

/// Units after this combo position receive the champ bonus.
const CHAMP_COMBO: usize = 23;
const CHAMP_BONUS: f64 = 1.5;
/// Highest combo position that still raises the combo multiplier.
const MAX_COMBO_MULTIPLIER: usize = 10;
/// Fixed multiplier of the in-game score curve.
const GAME_MULTIPLIER: f32 = 1.315;

const MIN_UNIT_LENGTH: f32 = 0.2;
const MAX_UNIT_LENGTH: f32 = 5.0;

/// Maximum score of a chart and its progression over the chart's notes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTable {
    /// Highest achievable score.
    pub max_score: i64,
    /// Highest score as displayed in-game.
    pub game_max_score: i64,
    /// Progress after each scoring unit, keyed by the index of the unit's
    /// last note in onset order.
    pub checkpoints: Vec<ScoreCheckpoint>,
}

/// Cumulative progress after a scoring unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreCheckpoint {
    /// Index of the unit's last note within the notes sorted by onset, not
    /// its index in the chart's input order.
    ///
    /// Notes sharing an onset are ordered by [`score_order`].
    pub note_idx: usize,
    /// Cumulative maximum score.
    pub max_score: i64,
    /// Cumulative amount of scoring units.
    pub note_count: usize,
}

impl ScoreTable {
    /// Amount of scoring units, i.e. notes after merging sliders.
    pub fn unit_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Progress at the last scoring unit ending at or before the note at
    /// `note_idx`.
    pub fn checkpoint_at(&self, note_idx: usize) -> Option<&ScoreCheckpoint> {
        let end = self
            .checkpoints
            .partition_point(|checkpoint| checkpoint.note_idx <= note_idx);

        end.checked_sub(1).map(|idx| &self.checkpoints[idx])
    }

    /// Cumulative maximum score at or before the note at `note_idx`.
    pub fn max_score_at(&self, note_idx: usize) -> i64 {
        self.checkpoint_at(note_idx)
            .map_or(0, |checkpoint| checkpoint.max_score)
    }

    /// Cumulative amount of scoring units at or before the note at
    /// `note_idx`.
    pub fn note_count_at(&self, note_idx: usize) -> usize {
        self.checkpoint_at(note_idx)
            .map_or(0, |checkpoint| checkpoint.note_count)
    }
}

/// Walks a chart's notes and accumulates the maximum score.
pub struct ScoreSimulator<'a> {
    notes: &'a [RawNote],
    tempo: f32,
}

impl<'a> ScoreSimulator<'a> {
    /// `notes` must be sorted by [`score_order`].
    pub const fn new(notes: &'a [RawNote], tempo: f32) -> Self {
        Self { notes, tempo }
    }

    pub fn simulate(&self) -> ScoreTable {
        let mut table = ScoreTable {
            checkpoints: Vec::with_capacity(self.notes.len()),
            ..ScoreTable::default()
        };

        let mut i = 0;

        while i < self.notes.len() {
            let mut length = self.notes[i].length;

            while i + 1 < self.notes.len() && self.notes[i].is_slider_into(&self.notes[i + 1]) {
                length += self.notes[i + 1].length;
                i += 1;
            }

            let combo = table.checkpoints.len();
            let unit_length = unit_length(beats_to_seconds(length, self.tempo));

            table.max_score += i64::from(unit_score(unit_length, combo));
            table.game_max_score += i64::from(game_unit_score(unit_length));

            table.checkpoints.push(ScoreCheckpoint {
                note_idx: i,
                max_score: table.max_score,
                note_count: combo + 1,
            });

            i += 1;
        }

        table
    }
}

/// Compute the maximum score table of unsorted notes.
///
/// Lengths are converted to seconds at the chart's base tempo.
pub fn compute_max_score(notes: &[RawNote], tempo: f32) -> ScoreTable {
    let mut sorted = notes.to_vec();
    sorted.sort_by(score_order);

    ScoreSimulator::new(&sorted, tempo).simulate()
}

/// Total order of notes for scoring.
///
/// Sorts by onset; notes sharing an onset are ordered by length and then by
/// their pitch fields so slider merging does not depend on input order.
pub fn score_order(a: &RawNote, b: &RawNote) -> Ordering {
    a.onset
        .total_cmp(&b.onset)
        .then_with(|| a.length.total_cmp(&b.length))
        .then_with(|| a.pitch_start.total_cmp(&b.pitch_start))
        .then_with(|| a.pitch_end.total_cmp(&b.pitch_end))
        .then_with(|| a.pitch_delta.total_cmp(&b.pitch_delta))
}

/// Length of a scoring unit in seconds mapped onto its base score.
pub fn unit_length(seconds: f32) -> f32 {
    seconds.clamp(MIN_UNIT_LENGTH, MAX_UNIT_LENGTH) * 8.0 + 10.0
}

fn unit_score(unit_length: f32, combo: usize) -> i32 {
    let champ_bonus = if combo > CHAMP_COMBO { CHAMP_BONUS } else { 0.0 };
    let coefficient = (combo.min(MAX_COMBO_MULTIPLIER) as f64 + champ_bonus) * 0.1 + 1.0;
    let score = (f64::from(unit_length) * 100.0 * coefficient) as f32;

    (f64::from(score).floor() * 10.0) as i32
}

fn game_unit_score(unit_length: f32) -> i32 {
    let score = unit_length * 100.0 * GAME_MULTIPLIER;

    (f64::from(score).floor() * 10.0).floor() as i32
}

/// Score of a single scoring unit for a given accuracy.
///
/// `total_length` is the unit's length in seconds and `combo_multiplier` the
/// combo position capped at `10`.
pub fn score(accuracy: f32, total_length: f32, combo_multiplier: f32, champ: bool) -> i32 {
    let bonus = if champ { CHAMP_BONUS as f32 } else { 0.0 };
    let base_score = unit_length(total_length);

    (base_score * accuracy * ((combo_multiplier + bonus) * 0.1 + 1.0)).floor() as i32 * 10
}

/// Health change for a note hit with the given accuracy in percent.
pub fn health_diff(accuracy: f32) -> f32 {
    ((accuracy - 79.0) * 0.2193).clamp(-15.0, 4.34)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(onset: f32, length: f32) -> RawNote {
        RawNote::new(onset, length, 0.0, 0.0, 0.0)
    }

    #[test]
    fn single_note() {
        let table = compute_max_score(&[note(0.0, 1.0)], 120.0);

        assert_eq!(table.max_score, 14_000);
        assert_eq!(table.game_max_score, 18_410);
        assert_eq!(table.unit_count(), 1);
    }

    #[test]
    fn sliders_form_one_unit() {
        let notes = [note(0.0, 1.0), note(1.0, 1.0), note(3.0, 1.0)];
        let table = compute_max_score(&notes, 120.0);

        assert_eq!(table.unit_count(), 2);
        assert_eq!(table.checkpoints[0].note_idx, 1);
        assert_eq!(table.checkpoints[1].note_idx, 2);

        // 1s merged: 18 * 100 * 1.0; 0.5s: 14 * 100 * 1.1
        assert_eq!(table.checkpoints[0].max_score, 18_000);
        assert_eq!(table.max_score, 18_000 + 15_400);
    }

    #[test]
    fn combo_multiplier_caps() {
        let notes: Vec<_> = (0..12).map(|i| note(i as f32 * 2.0, 1.0)).collect();
        let table = compute_max_score(&notes, 120.0);

        let last = table.checkpoints[11].max_score - table.checkpoints[10].max_score;
        let prev = table.checkpoints[10].max_score - table.checkpoints[9].max_score;

        assert_eq!(last, 28_000);
        assert_eq!(prev, 28_000);
    }

    #[test]
    fn champ_bonus_after_combo_23() {
        let notes: Vec<_> = (0..26).map(|i| note(i as f32 * 2.0, 1.0)).collect();
        let table = compute_max_score(&notes, 120.0);

        let unit = |idx: usize| {
            table.checkpoints[idx].max_score - table.checkpoints[idx - 1].max_score
        };

        assert_eq!(unit(23), 28_000);
        // 14 * 100 * ((10 + 1.5) * 0.1 + 1)
        assert_eq!(unit(24), 30_100);
    }

    #[test]
    fn lookups_at_or_before() {
        let notes = [note(0.0, 1.0), note(1.0, 1.0), note(3.0, 1.0)];
        let table = compute_max_score(&notes, 120.0);

        assert_eq!(table.max_score_at(0), 0);
        assert_eq!(table.max_score_at(1), 18_000);
        assert_eq!(table.note_count_at(1), 1);
        assert_eq!(table.note_count_at(100), 2);
    }

    #[test]
    fn tied_onsets_merge_the_same_way() {
        let long = note(0.0, 2.0);
        let short = note(0.0, 0.5);
        let next = note(1.5, 1.0);

        let a = compute_max_score(&[long, short, next], 120.0);
        let b = compute_max_score(&[short, long, next], 120.0);

        assert_eq!(a, b);
        // The longer tied note comes last and reaches into `next`
        assert_eq!(a.unit_count(), 1);
        assert_eq!(a.checkpoints[0].note_idx, 2);
    }

    #[test]
    fn long_charts_do_not_overflow() {
        let notes: Vec<_> = (0..150_000).map(|i| note(i as f32 * 2.0, 1.0)).collect();
        let table = ScoreSimulator::new(&notes, 120.0).simulate();

        assert!(table.max_score > i64::from(i32::MAX));
        assert!(table.game_max_score > i64::from(i32::MAX));
        assert_eq!(table.checkpoints.last().map(|c| c.max_score), Some(table.max_score));
    }

    #[test]
    fn standalone_score() {
        assert_eq!(score(1.0, 0.5, 0.0, false), 140);
        assert_eq!(score(0.5, 0.5, 10.0, true), 150);
    }

    #[test]
    fn health() {
        assert!((health_diff(79.0)).abs() < f32::EPSILON);
        assert!((health_diff(100.0) - 4.34).abs() < f32::EPSILON);
        assert!((health_diff(0.0) + 15.0).abs() < f32::EPSILON);
    }
}
