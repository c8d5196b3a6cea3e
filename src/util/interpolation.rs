use super::difficulty::lerp;

/// Piecewise-linear lookup over `(key, value)` pairs sorted by ascending key.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterpolationTable<const N: usize> {
    points: [(f32, f32); N],
}

impl<const N: usize> InterpolationTable<N> {
    /// Keys must be strictly ascending.
    pub const fn new(points: [(f32, f32); N]) -> Self {
        Self { points }
    }

    pub const fn points(&self) -> &[(f32, f32); N] {
        &self.points
    }

    /// Interpolate linearly between the two points bracketing `key`.
    ///
    /// Keys outside of the table's range are clamped to its first or last
    /// key.
    pub fn value_at(&self, key: f32) -> f32 {
        let (Some(&(first_key, first_value)), Some(&(last_key, last_value))) =
            (self.points.first(), self.points.last())
        else {
            return 0.0;
        };

        if key <= first_key {
            return first_value;
        } else if key >= last_key {
            return last_value;
        }

        // Index of the first point whose key is not below `key`; guaranteed
        // to be in `1..N` due to the checks above.
        let upper = self.points.partition_point(|(k, _)| *k < key);
        let (min_key, min_value) = self.points[upper - 1];
        let (max_key, max_value) = self.points[upper];

        lerp(min_value, max_value, (key - min_key) / (max_key - min_key))
    }
}
