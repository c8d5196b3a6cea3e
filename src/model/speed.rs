use crate::util::{difficulty::lerp, float_ext::FloatExt};

/// Playback speeds for which ratings are precomputed.
pub const GAME_SPEEDS: [f32; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Amount of playback speeds on the grid.
pub const SPEED_COUNT: usize = GAME_SPEEDS.len();

/// Index of the `1.0` playback speed.
pub const BASE_SPEED_IDX: usize = 2;

pub const MIN_SPEED: f32 = GAME_SPEEDS[0];
pub const MAX_SPEED: f32 = GAME_SPEEDS[SPEED_COUNT - 1];

const SPEED_STEP: f32 = 0.25;

/// Location of a playback speed on the speed grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GridPosition {
    /// The speed is exactly the grid speed at this index.
    Exact(usize),
    /// The speed lies between the grid speeds at `lower` and `lower + 1`.
    Between {
        lower: usize,
        /// Fractional position between the two grid speeds.
        by: f32,
    },
}

impl GridPosition {
    /// Locate `speed` on the grid after clamping it to the grid's range.
    pub fn new(speed: f32) -> Self {
        let speed = clamp_speed(speed);
        let idx = speed_to_index(speed);

        if speed.is_multiple_of(SPEED_STEP) {
            return Self::Exact(idx);
        }

        let min_speed = GAME_SPEEDS[idx];
        let max_speed = GAME_SPEEDS[idx + 1];

        Self::Between {
            lower: idx,
            by: (speed - min_speed) / (max_speed - min_speed),
        }
    }

    /// Resolve a value at this position given a lookup per grid index.
    ///
    /// Returns `None` if any required lookup returns `None`.
    pub fn interpolate<F>(self, mut value_at: F) -> Option<f32>
    where
        F: FnMut(usize) -> Option<f32>,
    {
        match self {
            Self::Exact(idx) => value_at(idx),
            Self::Between { lower, by } => {
                let min = value_at(lower)?;
                let max = value_at(lower + 1)?;

                Some(lerp(min, max, by))
            }
        }
    }
}

/// Clamp a playback speed to the grid's range.
///
/// `NaN` is mapped onto the base speed.
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        GAME_SPEEDS[BASE_SPEED_IDX]
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Index of the highest grid speed that is not above `speed`.
pub fn speed_to_index(speed: f32) -> usize {
    let speed = clamp_speed(speed);

    (((speed - MIN_SPEED) / SPEED_STEP) as usize).min(SPEED_COUNT - 1)
}

/// Interpolate a per-speed value table at `speed`.
pub fn lerp_by_speed(values: &[f32; SPEED_COUNT], speed: f32) -> f32 {
    GridPosition::new(speed)
        .interpolate(|idx| Some(values[idx]))
        .unwrap_or_default()
}
