use std::f32::consts::E;

use crate::util::difficulty::lerp;

use super::{Blend, ModifierWeights, RatingFormula};

/// The current tuning of the rating algorithm.
#[derive(Copy, Clone, Debug, Default)]
pub struct Latest;

impl Latest {
    const AIM_END: f32 = 55.0;
    const TAP_END: f32 = 10.0;
    const ACC_END: f32 = 125.0;
    const MUL_END: f32 = 50.0;

    // https://www.desmos.com/calculator/e4kskdn8mu
    const COMPRESS_A: f32 = -35.0;
    const COMPRESS_B: f32 = -0.5;
    const COMPRESS_P: f32 = 1.25;
}

#[rustfmt::skip]
const WEIGHTS: [f32; 64] = [
    1.0000, 0.9000, 0.8100, 0.7290, 0.6561, 0.5905, 0.5314, 0.4783,
    0.4305, 0.3874, 0.3487, 0.3138, 0.2824, 0.2542, 0.2288, 0.2059,
    0.1853, 0.1668, 0.1501, 0.1351, 0.1216, 0.1094, 0.0985, 0.0887,
    0.0798, 0.0718, 0.0646, 0.0582, 0.0524, 0.0472, 0.0425, 0.0383,
    0.0345, 0.0311, 0.0280, 0.0252, 0.0227, 0.0204, 0.0184, 0.0166,
    0.0149, 0.0134, 0.0121, 0.0109, 0.0098, 0.0088, 0.0079, 0.0071,
    0.0064, 0.0057, 0.0051, 0.0046, 0.0041, 0.0037, 0.0033, 0.0030,
    0.0027, 0.0024, 0.0022, 0.0020, 0.0018, 0.0016, 0.0015, 0.0013,
];

impl RatingFormula for Latest {
    const WEIGHTS: &'static [f32] = &WEIGHTS;
    const WINDOW: usize = 6;

    const AIM_DIV: f32 = 31.0;
    const TAP_DIV: f32 = 27.0;
    const ACC_DIV: f32 = 20.0;

    const BLEND: Blend = Blend {
        bias: 0.75,
        aim_weight: 1.25,
        tap_weight: 1.0,
    };

    const MODIFIERS: ModifierWeights = ModifierWeights {
        hidden: [0.11, 0.09],
        flashlight: [0.2, 0.15],
        easy: [-0.15, -0.14],
        easy_scale: 0.4,
    };

    fn compress(strain: f32) -> f32 {
        Self::COMPRESS_A * (strain + 1.0).powf(Self::COMPRESS_B * E)
            - Self::COMPRESS_A
            - strain.powf(Self::COMPRESS_P) / Self::COMPRESS_A
    }

    fn aim_strain(distance: f32, weight: f32, delta_time: f32) -> f32 {
        let speed = (distance + 50.0).sqrt() * 0.75 / delta_time.powf(1.38);

        speed * weight
    }

    fn aim_endurance(distance: f32, weight: f32, delta_time: f32) -> f32 {
        let speed = (distance + 25.0).sqrt() * 0.25
            / delta_time.powf(1.08)
            / (Self::AIM_END * Self::MUL_END);

        speed * weight
    }

    fn tap_strain(tap_delta: f32, weight: f32, aim_distance: f32) -> f32 {
        let base_value = lerp(3.25, 5.5, aim_distance / Self::CHEESABLE_THRESHOLD).min(6.0);

        base_value / tap_delta.powf(1.38) * weight
    }

    fn tap_endurance(tap_delta: f32, weight: f32, aim_distance: f32) -> f32 {
        let base_value = lerp(0.11, 0.2, aim_distance / Self::CHEESABLE_THRESHOLD).min(0.25);

        base_value / tap_delta.powf(1.08) / (Self::TAP_END * Self::MUL_END) * weight
    }

    fn acc_strain(length_sum: f32, slide_delta: f32, weight: f32) -> f32 {
        let speed = slide_delta * 4.0 / length_sum.powf(1.16);

        speed * weight
    }

    fn acc_endurance(length_sum: f32, slide_delta: f32, weight: f32) -> f32 {
        let speed = slide_delta * 0.25
            / length_sum.powf(1.08)
            / (Self::ACC_END * Self::MUL_END);

        speed * weight
    }
}
