#![allow(unused)]

use toot_pp::{Chart, RawNote};

pub use self::mods::*;

/// Bit values for mods
mod mods {
    pub const NM: u32 = 0;
    pub const EZ: u32 = 1 << 1;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const FL: u32 = 1 << 10;
}

/// Alternating jumps at a constant rhythm.
pub fn stream(count: usize, tempo: f32) -> Chart {
    let notes = (0..count)
        .map(|i| {
            let pitch = if i % 2 == 0 { 40.0 } else { -40.0 };

            RawNote::new(i as f32 * 0.5, 0.25, pitch, pitch, 0.0)
        })
        .collect();

    Chart::new(tempo, notes)
}

/// Regular notes, slider chains, and short bursts.
pub fn mixed() -> Chart {
    let mut onset = 0.0;

    let notes = (0..96_i32)
        .map(|i| {
            let pitch = ((i * 37) % 180 - 90) as f32;

            let (length, gap, delta) = match i % 8 {
                0..=3 => (0.5, 1.0, 0.0),
                4 | 5 => (1.0, 1.0, ((i * 13) % 60 - 30) as f32),
                _ => (0.25, 0.5, 0.0),
            };

            let note = RawNote::new(onset, length, pitch, pitch + delta, delta);
            onset += gap;

            note
        })
        .collect();

    Chart::new(120.0, notes)
}

/// Groups of notes sharing an onset with different lengths.
pub fn chords() -> Chart {
    let notes = (0..24_i32)
        .flat_map(|i| {
            let onset = i as f32 * 1.5;
            let pitch = ((i * 29) % 120 - 60) as f32;

            [
                RawNote::new(onset, 2.0, pitch, pitch, 0.0),
                RawNote::new(onset, 0.5, -pitch, -pitch, 0.0),
                RawNote::new(onset, 0.25, pitch, pitch + 10.0, 10.0),
            ]
        })
        .collect();

    Chart::new(120.0, notes)
}

/// Notes that collapse onto the same position through sliders.
pub fn pathological() -> Chart {
    Chart::new(
        120.0,
        vec![
            RawNote::new(0.0, 0.0, 10.0, 10.0, 0.0),
            RawNote::new(0.0, 1.0, 10.0, 10.0, 0.0),
            RawNote::new(1.0, 1.0, 10.0, 10.0, 0.0),
        ],
    )
}

#[track_caller]
pub fn assert_eq_float(a: f32, b: f32) {
    assert!((a - b).abs() < f32::EPSILON, "{a} != {b}");
}

#[track_caller]
pub fn assert_approx(a: f32, b: f32, tolerance: f32) {
    assert!((a - b).abs() <= tolerance, "{a} != {b} (tolerance {tolerance})");
}
