use crate::{model::mods::GameMods, util::interpolation::InterpolationTable};

/// Accuracy to performance multiplier.
#[rustfmt::skip]
pub const MULTIPLIERS: InterpolationTable<20> = InterpolationTable::new([
    (0.0, 0.0), (0.25, 0.2), (0.5, 0.65), (0.6, 2.2), (0.7, 4.0),
    (0.8, 6.0), (0.85, 7.0), (0.875, 7.5), (0.9, 8.2), (0.925, 9.2),
    (0.95, 10.8), (0.96, 11.8), (0.97, 13.8), (0.98, 16.1), (0.985, 18.1),
    (0.99, 20.5), (0.993, 23.2), (0.996, 27.2), (0.999, 32.4), (1.0, 40.2),
]);

/// Accuracy to performance multiplier while Easy is active.
#[rustfmt::skip]
pub const EZ_MULTIPLIERS: InterpolationTable<20> = InterpolationTable::new([
    (0.0, 0.0), (0.25, 0.03), (0.5, 0.22), (0.6, 1.12), (0.7, 2.5),
    (0.8, 4.6), (0.85, 5.6), (0.875, 6.2), (0.9, 6.8), (0.925, 7.6),
    (0.95, 8.3), (0.96, 8.6), (0.97, 9.0), (0.98, 9.6), (0.985, 10.0),
    (0.99, 10.6), (0.993, 11.0), (0.996, 11.6), (0.999, 12.6), (1.0, 15.4),
]);

/// Performance multiplier for an accuracy between `0.0` and `1.0`.
pub fn accuracy_multiplier(accuracy: f32, mods: &GameMods) -> f32 {
    let table = if mods.ez() {
        &EZ_MULTIPLIERS
    } else {
        &MULTIPLIERS
    };

    table.value_at(accuracy.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ascend() {
        for table in [MULTIPLIERS, EZ_MULTIPLIERS] {
            assert!(table.points().windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn exact_and_between() {
        let nomod = GameMods::default();

        assert!((accuracy_multiplier(0.95, &nomod) - 10.8).abs() < 1e-5);
        assert!((accuracy_multiplier(0.955, &nomod) - 11.3).abs() < 1e-4);
        assert!((accuracy_multiplier(1.5, &nomod) - 40.2).abs() < f32::EPSILON);
        assert!(accuracy_multiplier(-1.0, &nomod).abs() < f32::EPSILON);
    }

    #[test]
    fn easy_table() {
        let easy = GameMods::from("EZ");

        assert!((accuracy_multiplier(1.0, &easy) - 15.4).abs() < f32::EPSILON);
    }
}
