/// Long-horizon fatigue accumulator of a skill.
///
/// Endurance only decays once it exceeds a threshold relative to the current
/// strain, and decays faster after longer gaps between notes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Endurance {
    value: f32,
    threshold_multiplier: f32,
}

impl Endurance {
    const DECAY: f32 = 0.2;
    const MAX_GAP: f32 = 5.0;
    const DIVIDER_BASE: f32 = 61.0;
    const DIVIDER_PER_SECOND: f32 = 12.0;

    pub const fn new(threshold_multiplier: f32) -> Self {
        Self {
            value: 0.0,
            threshold_multiplier,
        }
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    pub fn add(&mut self, endurance: f32) {
        self.value += endurance;
    }

    /// Decay divider for a gap in seconds to the previous note.
    pub fn divider(gap: f32) -> f32 {
        Self::DIVIDER_BASE - gap.min(Self::MAX_GAP) * Self::DIVIDER_PER_SECOND
    }

    /// Bleed off endurance that exceeds the strain-relative threshold.
    pub fn decay(&mut self, strain: f32, divider: f32) {
        let threshold = strain.sqrt() * self.threshold_multiplier;

        if self.value >= threshold {
            self.value /= 1.0 + Self::DECAY * (self.value - threshold) / divider;
        }
    }
}
