use crate::model::mods::GameMods;

pub use self::{latest::Latest, legacy::Legacy};

mod latest;
mod legacy;

/// Constants and formula bodies of one tuning of the rating algorithm.
///
/// Different implementors produce materially different values for the same
/// chart and must not be mixed within one calculation.
pub trait RatingFormula {
    /// Per-lag weights, indexed by the amount of previous notes already
    /// considered for the current note.
    const WEIGHTS: &'static [f32];
    /// Maximum amount of previous notes considered for a note.
    const WINDOW: usize;
    /// Maximum distance in seconds to a considered previous note, unless it is
    /// one of the two immediate predecessors.
    const MAX_DIST: f32 = 8.0;

    /// Pitch movements up to this magnitude count as cheesable.
    const CHEESABLE_THRESHOLD: f32 = 34.375;
    /// Multiplier for cheesable slide deltas.
    const CHEESE_MULTIPLIER: f32 = 0.15;
    /// Length multiplier for slider segments without pitch change.
    const FLAT_SLIDER_LENGTH_MULTIPLIER: f32 = 0.85;

    const AIM_DIV: f32;
    const TAP_DIV: f32;
    const ACC_DIV: f32;

    const AIM_THRESHOLD_MULTIPLIER: f32 = 1.5;
    const TAP_THRESHOLD_MULTIPLIER: f32 = 2.5;

    const BLEND: Blend;
    const MODIFIERS: ModifierWeights;

    /// Nonlinear compression applied to accumulated aim and tap strain.
    fn compress(strain: f32) -> f32;

    fn aim_strain(distance: f32, weight: f32, delta_time: f32) -> f32;
    fn aim_endurance(distance: f32, weight: f32, delta_time: f32) -> f32;

    fn tap_strain(tap_delta: f32, weight: f32, aim_distance: f32) -> f32;
    fn tap_endurance(tap_delta: f32, weight: f32, aim_distance: f32) -> f32;

    fn acc_strain(length_sum: f32, slide_delta: f32, weight: f32) -> f32;
    fn acc_endurance(length_sum: f32, slide_delta: f32, weight: f32) -> f32;

    /// Reduce a slide delta if its magnitude is cheesable.
    fn cheese_adjusted(slide_delta: f32) -> f32 {
        let slide_delta = slide_delta.abs();

        if slide_delta <= Self::CHEESABLE_THRESHOLD {
            slide_delta * Self::CHEESE_MULTIPLIER
        } else {
            slide_delta
        }
    }
}

/// Which tuning of the rating algorithm to use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormulaVersion {
    /// The current tuning.
    #[default]
    Latest,
    /// Alternative tuning with a longer window and a 96-entry weight table.
    ///
    /// Its constants are not derived from a published TootTally release, so
    /// its ratings are not comparable with those of any official tuning.
    Legacy,
}

impl FormulaVersion {
    pub const fn blend(self) -> Blend {
        match self {
            Self::Latest => Latest::BLEND,
            Self::Legacy => Legacy::BLEND,
        }
    }

    pub const fn modifiers(self) -> ModifierWeights {
        match self {
            Self::Latest => Latest::MODIFIERS,
            Self::Legacy => Legacy::MODIFIERS,
        }
    }
}

/// Weighting used to combine aim and tap ratings into a star rating.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blend {
    /// Added to each skill's share of the combined rating.
    pub bias: f32,
    pub aim_weight: f32,
    pub tap_weight: f32,
}

impl Blend {
    /// Combine aim and tap ratings, upweighting the dominant skill.
    ///
    /// Returns `0.0` if either rating is zero.
    pub fn star_rating(&self, aim_rating: f32, tap_rating: f32) -> f32 {
        if aim_rating == 0.0 || tap_rating == 0.0 {
            return 0.0;
        }

        self.weighted(aim_rating, tap_rating)
    }

    /// Combine aim and tap ratings without the zero check.
    pub(crate) fn weighted(&self, aim_rating: f32, tap_rating: f32) -> f32 {
        let total_rating = aim_rating + tap_rating;
        let aim_perc = aim_rating / total_rating;
        let tap_perc = tap_rating / total_rating;
        let aim_weight = (aim_perc + self.bias) * self.aim_weight;
        let tap_weight = (tap_perc + self.bias) * self.tap_weight;
        let total_weight = aim_weight + tap_weight;

        (aim_rating * aim_weight + tap_rating * tap_weight) / total_weight
    }
}

/// Rating adjustments per modifier as `[aim, tap]` pairs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModifierWeights {
    pub hidden: [f32; 2],
    pub flashlight: [f32; 2],
    pub easy: [f32; 2],
    /// Scales the hidden and flashlight adjustments while easy is active.
    pub easy_scale: f32,
}

impl ModifierWeights {
    /// Smallest multiplier a skill rating can receive.
    const MIN_MULTIPLIER: f32 = 0.01;

    /// Multipliers for the aim and tap rating under the given mods.
    pub fn multipliers(&self, mods: &GameMods) -> (f32, f32) {
        let mut aim_mult = 1.0;
        let mut tap_mult = 1.0;

        let scale = if mods.ez() { self.easy_scale } else { 1.0 };

        if mods.hd() {
            aim_mult += self.hidden[0] * scale;
            tap_mult += self.hidden[1] * scale;
        }

        if mods.fl() {
            aim_mult += self.flashlight[0] * scale;
            tap_mult += self.flashlight[1] * scale;
        }

        if mods.ez() {
            aim_mult += self.easy[0];
            tap_mult += self.easy[1];
        }

        if aim_mult <= 0.0 {
            aim_mult = Self::MIN_MULTIPLIER;
        }

        if tap_mult <= 0.0 {
            tap_mult = Self::MIN_MULTIPLIER;
        }

        (aim_mult, tap_mult)
    }
}
