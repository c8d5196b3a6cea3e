pub use self::{
    chart::{Chart, ChartError, ChartMetadata},
    mods::GameMods,
    note::{Note, RawNote},
};

/// Chart input types.
pub mod chart;

/// Modifier handling.
pub mod mods;

/// Raw and normalized notes.
pub mod note;

/// The playback speed grid.
pub mod speed;
