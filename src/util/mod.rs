pub mod difficulty;
pub mod float_ext;
pub mod interpolation;
