/// Local difficulty of a single note for one skill.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DataVector {
    /// Position of the note in seconds.
    pub time: f32,
    /// Short-horizon strain.
    pub performance: f32,
    /// Long-horizon endurance.
    pub endurance: f32,
    /// Sum of the lag weights that contributed to this note.
    pub weight: f32,
}

impl DataVector {
    pub const fn new(time: f32, performance: f32, endurance: f32, weight: f32) -> Self {
        Self {
            time,
            performance,
            endurance,
            weight,
        }
    }

    /// Combined difficulty used for sorting and averaging.
    pub fn difficulty(&self) -> f32 {
        self.performance + self.endurance
    }
}

/// Reduction over a list of [`DataVector`]s.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DataVectorAnalytics {
    pub perf_max: f32,
    pub perf_weighted_average: f32,
    /// Normalizing denominator of the weighted average.
    pub weight_sum: f32,
}

impl Default for DataVectorAnalytics {
    fn default() -> Self {
        Self {
            perf_max: 0.0,
            perf_weighted_average: 0.0,
            weight_sum: 1.0,
        }
    }
}

impl DataVectorAnalytics {
    /// Reduce `vectors`.
    ///
    /// The weight sum is seeded at `1.0` and scaled by `song_length_mult` so
    /// that short charts do not produce inflated averages.
    pub fn new(vectors: &[DataVector], song_length_mult: f32) -> Self {
        let mut this = Self::default();

        if vectors.is_empty() {
            return this;
        }

        this.weight_sum += vectors.iter().map(|vector| vector.weight).sum::<f32>();
        this.weight_sum *= song_length_mult;

        for vector in vectors {
            if vector.performance > this.perf_max {
                this.perf_max = vector.performance;
            }

            this.perf_weighted_average += vector.difficulty() * (vector.weight / this.weight_sum);
        }

        this
    }
}

/// Sort vectors ascending by their combined difficulty.
pub(crate) fn sort_by_difficulty(vectors: &[DataVector]) -> Box<[DataVector]> {
    let mut sorted = vectors.to_vec();
    sorted.sort_by(|a, b| a.difficulty().total_cmp(&b.difficulty()));

    sorted.into_boxed_slice()
}
