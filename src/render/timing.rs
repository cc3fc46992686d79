// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Flashcard timing.
//!
//! Each card lasts one bar of 4/4. The voice lands on beat one and a
//! metronome click marks beats two, three and four.

/// Beats shown per flashcard
pub const BEATS_PER_CARD: u32 = 4;

/// Seconds per flashcard at a given tempo.
///
/// 60 BPM -> 4s, 120 BPM -> 2s, 240 BPM -> 1s.
pub fn frame_duration_for_bpm(bpm: f64) -> f64 {
    60.0 * BEATS_PER_CARD as f64 / bpm
}

/// Tempo implied by a flashcard duration
pub fn bpm_for_frame_duration(frame_duration: f64) -> f64 {
    60.0 * BEATS_PER_CARD as f64 / frame_duration
}

/// Offsets in seconds of every beat within one card, starting at 0.0
pub fn beat_offsets(frame_duration: f64) -> Vec<f64> {
    let beat = frame_duration / BEATS_PER_CARD as f64;
    (0..BEATS_PER_CARD).map(|i| beat * i as f64).collect()
}
