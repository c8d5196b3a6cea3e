use proptest::prelude::*;
use toot_pp::{
    difficulty::object::NoteNormalizer,
    model::speed::{speed_to_index, GAME_SPEEDS},
    CalculationError, Chart, ChartError, Difficulty, FormulaVersion, GameMods, RawNote,
};

use self::common::*;

mod common;

#[test]
fn grid_ratings_are_exact() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();
    let ratings = attrs.performances.star_ratings().unwrap();

    for (speed, rating) in GAME_SPEEDS.into_iter().zip(ratings) {
        assert_eq!(attrs.performances.diff_rating(speed), Some(rating));
        assert_eq!(attrs.performances.star_rating(speed), Some(rating));
    }
}

#[test]
fn faster_is_harder() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();
    let ratings = attrs.performances.star_ratings().unwrap();

    assert!(ratings.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn full_completion_matches_rating() {
    for chart in [mixed(), stream(64, 140.0)] {
        let attrs = Difficulty::new().calculate(&chart).unwrap();
        let perfs = &attrs.performances;

        for speed in GAME_SPEEDS {
            let dynamic = perfs
                .dynamic_diff_rating(speed, 1.0, &GameMods::default())
                .unwrap();

            assert_approx(dynamic, perfs.diff_rating(speed).unwrap(), 1e-3);
        }
    }
}

#[test]
fn dynamic_rating_grows_with_completion() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();
    let nomod = GameMods::default();

    for speed in [0.5, 1.0, 1.1, 1.6, 2.0] {
        let mut prev = 0.0;

        for step in 0..=100 {
            let percent = step as f32 / 100.0;
            let rating = attrs
                .performances
                .dynamic_diff_rating(speed, percent, &nomod)
                .unwrap();

            assert!(rating + 1e-5 >= prev, "{rating} < {prev} at {percent}");
            prev = rating;
        }
    }
}

#[test]
fn zero_completion_is_zero() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();
    let rating = attrs
        .performances
        .dynamic_diff_rating(1.0, 0.0, &GameMods::from(HD))
        .unwrap();

    assert_eq_float(rating, 0.0);
}

#[test]
fn modifiers() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();
    let perfs = &attrs.performances;

    let rating = |mods: u32| {
        perfs
            .dynamic_diff_rating(1.0, 0.9, &GameMods::from(mods))
            .unwrap()
    };

    let nomod = rating(NM);

    assert!(rating(HD) > nomod);
    assert!(rating(FL) > rating(HD));
    assert!(rating(EZ) < nomod);
    assert!(rating(HD + EZ) < rating(HD));
    assert_eq_float(rating(HR), nomod);
    assert_eq_float(
        perfs.dynamic_diff_rating(1.0, 0.9, &GameMods::from("HD")).unwrap(),
        rating(HD),
    );
}

#[test]
fn divergence_marks_speeds_unavailable() {
    let attrs = Difficulty::new().calculate(&pathological()).unwrap();
    let perfs = &attrs.performances;

    assert_eq!(perfs.diverged().count(), GAME_SPEEDS.len());
    assert_eq!(perfs.diff_rating(1.0), None);
    assert_eq!(perfs.dynamic_diff_rating(1.0, 1.0, &GameMods::default()), None);

    let divergence = perfs.diverged().next().unwrap();
    assert_eq!(divergence.note, 3);

    // Score is unaffected
    assert!(attrs.score.max_score > 0);
}

#[test]
fn short_chart_uses_min_song_length() {
    let chart = stream(2, 120.0);
    let attrs = Difficulty::new().calculate(&chart).unwrap();

    // Single interval of 0.25s is below the one second floor
    assert_eq_float(attrs.performances.song_length(), 1.0);
    assert!(attrs.performances.song_length_mult() > 1.0);
}

#[test]
fn versions_differ() {
    let chart = mixed();
    let latest = Difficulty::new().calculate(&chart).unwrap();
    let legacy = Difficulty::new()
        .version(FormulaVersion::Legacy)
        .calculate(&chart)
        .unwrap();

    assert_eq!(legacy.performances.version(), FormulaVersion::Legacy);
    assert_ne!(
        latest.performances.star_ratings(),
        legacy.performances.star_ratings()
    );
}

#[test]
fn slider_count() {
    let attrs = Difficulty::new().calculate(&mixed()).unwrap();

    // Each group of 8 notes contains one chain of three merged notes
    assert_eq!(attrs.slider_count(), 72);
}

#[test]
fn malformed_input() {
    let mut chart = mixed();
    chart.notes[5].pitch_end = f32::NAN;

    assert_eq!(
        Difficulty::new().calculate(&chart).unwrap_err(),
        CalculationError::Malformed(ChartError::NonFinite {
            index: 5,
            field: "pitch_end"
        })
    );
}

#[test]
fn runs_in_custom_pool() {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap();

    let chart = mixed();
    let pooled = pool.install(|| Difficulty::new().calculate(&chart)).unwrap();
    let default = Difficulty::new().calculate(&chart).unwrap();

    assert_eq!(pooled.performances, default.performances);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..Default::default()
    })]

    #[test]
    fn interpolation_between_neighbors(speed in 0.5_f32..=2.0) {
        let attrs = Difficulty::new().calculate(&mixed()).unwrap();
        let perfs = &attrs.performances;

        let idx = speed_to_index(speed);
        let lower = perfs.star_rating(GAME_SPEEDS[idx]).unwrap();
        let upper = perfs.star_rating(GAME_SPEEDS[(idx + 1).min(GAME_SPEEDS.len() - 1)]).unwrap();
        let rating = perfs.diff_rating(speed).unwrap();

        prop_assert!(lower - 1e-5 <= rating && rating <= upper + 1e-5);
    }

    #[test]
    fn skill_ratings_grow_with_completion(
        speed in 0.5_f32..=2.0,
        a in 0.0_f32..=1.0,
        b in 0.0_f32..=1.0,
    ) {
        let attrs = Difficulty::new().calculate(&mixed()).unwrap();
        let perfs = &attrs.performances;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let aim_low = perfs.dynamic_aim_rating(speed, low).unwrap();
        let aim_high = perfs.dynamic_aim_rating(speed, high).unwrap();
        let tap_low = perfs.dynamic_tap_rating(speed, low).unwrap();
        let tap_high = perfs.dynamic_tap_rating(speed, high).unwrap();

        prop_assert!(aim_low <= aim_high + 1e-5);
        prop_assert!(tap_low <= tap_high + 1e-5);
    }

    #[test]
    fn sliders_ignore_tempo(
        notes in prop::collection::vec((0.0_f32..64.0, -1.0_f32..4.0), 1..64),
        tempo in 30.0_f32..300.0,
        factor in 0.25_f32..4.0,
    ) {
        let raw: Vec<_> = notes
            .into_iter()
            .map(|(onset, length)| RawNote::new(onset, length, 0.0, 0.0, 0.0))
            .collect();

        let slow = NoteNormalizer::new(&Chart::new(tempo, raw.clone())).unwrap();
        let fast = NoteNormalizer::new(&Chart::new(tempo * factor, raw)).unwrap();

        let slow_flags: Vec<_> = slow.notes_at(1.0).iter().map(|note| note.is_slider).collect();
        let fast_flags: Vec<_> = fast.notes_at(2.0).iter().map(|note| note.is_slider).collect();

        prop_assert_eq!(slow_flags, fast_flags);
    }
}
