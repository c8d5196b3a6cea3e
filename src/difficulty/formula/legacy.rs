use std::f32::consts::E;

use crate::util::difficulty::lerp;

use super::{Blend, ModifierWeights, RatingFormula};

/// Alternative tuning of the rating algorithm.
///
/// The constants are unverified and not taken from a released tuning.
/// Considers a longer window of previous notes with a slower weight decay
/// and compresses strain less aggressively.
#[derive(Copy, Clone, Debug, Default)]
pub struct Legacy;

impl Legacy {
    const AIM_END: f32 = 50.0;
    const TAP_END: f32 = 12.0;
    const ACC_END: f32 = 120.0;
    const MUL_END: f32 = 50.0;

    const COMPRESS_A: f32 = -30.0;
    const COMPRESS_B: f32 = -0.55;
    const COMPRESS_P: f32 = 1.2;
}

#[rustfmt::skip]
const WEIGHTS: [f32; 96] = [
    1.0000, 0.9300, 0.8649, 0.8044, 0.7481, 0.6957, 0.6470, 0.6017,
    0.5596, 0.5204, 0.4840, 0.4501, 0.4186, 0.3893, 0.3620, 0.3367,
    0.3131, 0.2912, 0.2708, 0.2519, 0.2342, 0.2178, 0.2026, 0.1884,
    0.1752, 0.1630, 0.1516, 0.1409, 0.1311, 0.1219, 0.1134, 0.1054,
    0.0981, 0.0912, 0.0848, 0.0789, 0.0733, 0.0682, 0.0634, 0.0590,
    0.0549, 0.0510, 0.0475, 0.0441, 0.0410, 0.0382, 0.0355, 0.0330,
    0.0307, 0.0286, 0.0266, 0.0247, 0.0230, 0.0214, 0.0199, 0.0185,
    0.0172, 0.0160, 0.0149, 0.0138, 0.0129, 0.0120, 0.0111, 0.0103,
    0.0096, 0.0089, 0.0083, 0.0077, 0.0072, 0.0067, 0.0062, 0.0058,
    0.0054, 0.0050, 0.0047, 0.0043, 0.0040, 0.0037, 0.0035, 0.0032,
    0.0030, 0.0028, 0.0026, 0.0024, 0.0023, 0.0021, 0.0019, 0.0018,
    0.0017, 0.0016, 0.0015, 0.0014, 0.0013, 0.0012, 0.0011, 0.0010,
];

impl RatingFormula for Legacy {
    const WEIGHTS: &'static [f32] = &WEIGHTS;
    const WINDOW: usize = 8;

    const AIM_DIV: f32 = 30.0;
    const TAP_DIV: f32 = 25.0;
    const ACC_DIV: f32 = 18.0;

    const BLEND: Blend = Blend {
        bias: 0.7,
        aim_weight: 1.2,
        tap_weight: 1.0,
    };

    const MODIFIERS: ModifierWeights = ModifierWeights {
        hidden: [0.1, 0.08],
        flashlight: [0.18, 0.14],
        easy: [-0.16, -0.15],
        easy_scale: 0.5,
    };

    fn compress(strain: f32) -> f32 {
        Self::COMPRESS_A * (strain + 1.0).powf(Self::COMPRESS_B * E)
            - Self::COMPRESS_A
            - strain.powf(Self::COMPRESS_P) / Self::COMPRESS_A
    }

    fn aim_strain(distance: f32, weight: f32, delta_time: f32) -> f32 {
        let speed = (distance + 50.0).sqrt() * 0.7 / delta_time.powf(1.35);

        speed * weight
    }

    fn aim_endurance(distance: f32, weight: f32, delta_time: f32) -> f32 {
        let speed = (distance + 25.0).sqrt() * 0.2
            / delta_time.powf(1.1)
            / (Self::AIM_END * Self::MUL_END);

        speed * weight
    }

    fn tap_strain(tap_delta: f32, weight: f32, aim_distance: f32) -> f32 {
        let base_value = lerp(3.0, 5.0, aim_distance / Self::CHEESABLE_THRESHOLD).min(5.5);

        base_value / tap_delta.powf(1.35) * weight
    }

    fn tap_endurance(tap_delta: f32, weight: f32, aim_distance: f32) -> f32 {
        let base_value = lerp(0.1, 0.18, aim_distance / Self::CHEESABLE_THRESHOLD).min(0.22);

        base_value / tap_delta.powf(1.1) / (Self::TAP_END * Self::MUL_END) * weight
    }

    fn acc_strain(length_sum: f32, slide_delta: f32, weight: f32) -> f32 {
        let speed = slide_delta * 3.5 / length_sum.powf(1.2);

        speed * weight
    }

    fn acc_endurance(length_sum: f32, slide_delta: f32, weight: f32) -> f32 {
        let speed = slide_delta * 0.2
            / length_sum.powf(1.1)
            / (Self::ACC_END * Self::MUL_END);

        speed * weight
    }
}
