//! Library to calculate difficulty, score, and performance values of
//! [Trombone Champ] charts as rated by [TootTally].
//!
//! ## Description
//!
//! Raw notes of a chart are converted into notes in seconds for each of seven
//! playback speeds between `0.5` and `2.0`. For every speed, each note is rated
//! by how demanding its aim and tap movements are in relation to the previous
//! few notes, while an endurance accumulator keeps track of sustained effort.
//! The per-note values are reduced into an aim and a tap rating that are
//! blended into the chart's star rating.
//!
//! Ratings for speeds between grid points are interpolated. Partial plays are
//! rated dynamically by only considering the easiest notes of the chart up to
//! the play's completion.
//!
//! ## Usage
//!
//! ```
//! use toot_pp::{Chart, ChartPerformance, Difficulty, RawNote};
//!
//! // Rows of `[onset, length, pitch_start, pitch_delta, pitch_end]` in beats
//! let chart = Chart::from_rows(
//!     128.0,
//!     &[
//!         [0.0, 0.5, 0.0, 0.0, 0.0],
//!         [1.0, 0.5, 40.0, 0.0, 40.0],
//!         [2.0, 1.0, -20.0, 60.0, 40.0],
//!         [3.5, 0.25, 100.0, 0.0, 100.0],
//!     ],
//! );
//!
//! let attrs = Difficulty::new().calculate(&chart).unwrap();
//!
//! let stars = attrs.performances.diff_rating(1.0).unwrap();
//! let max_score = attrs.score.max_score;
//!
//! let perf = ChartPerformance::new(&attrs.performances)
//!     .speed(1.0)
//!     .accuracy(0.985)
//!     .mods("HD")
//!     .calculate()
//!     .unwrap();
//!
//! println!("Stars: {stars} | Max score: {max_score} | TT: {}", perf.tt);
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Enables the `tracing` feature |
//! | `tracing` | Diverging speeds are logged through `tracing::error` and calculation times through `tracing::debug`. If this feature is not enabled, nothing is logged. | [`tracing`]
//!
//! [Trombone Champ]: https://www.trombonechamp.com/
//! [TootTally]: https://toottally.com/
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    clippy::similar_names
)]

#[doc(inline)]
pub use self::{
    difficulty::{
        formula::FormulaVersion, CalculationError, ChartAttributes, ChartPerformances,
        Difficulty, NumericDivergence,
    },
    model::{Chart, ChartError, ChartMetadata, GameMods, Note, RawNote},
    performance::{ChartPerformance, PerformanceAttributes},
    score::ScoreTable,
    selection::{CancellationToken, ChartSelector},
};

/// Note normalization, strain calculation, and ratings.
pub mod difficulty;

/// Input types.
pub mod model;

/// Performance values of plays.
pub mod performance;

/// Maximum score and scoring helpers.
pub mod score;

/// Switching between charts with cancellation.
pub mod selection;

mod util;
