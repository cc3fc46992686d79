// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Video render plans.
//!
//! A plan lays out every flashcard of a quiz on the output timeline: which
//! image is shown, when, and which audio clips are mixed underneath it.
//! Compositors consume plans; nothing here touches pixels or samples.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::assets::{image_path, voice_path};
use super::timing::beat_offsets;
use crate::config::RenderConfig;
use crate::generators::Sequence;
use crate::music::NoteLabel;

/// Source of an audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Spoken note name
    Voice,
    /// Metronome click
    Click,
}

/// One audio clip placed inside a flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioLayer {
    pub kind: LayerKind,
    /// Audio file
    pub path: PathBuf,
    /// Seconds from the start of the card
    pub offset: f64,
    /// Linear gain (1.0 = unchanged)
    pub volume: f64,
    /// Trim the clip to this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

/// A single note card on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub label: NoteLabel,
    /// Text rendered on the card, with music glyphs
    pub display_text: String,
    /// Pre-rendered image
    pub image: PathBuf,
    /// Seconds from the start of the video
    pub start: f64,
    /// Seconds on screen
    pub duration: f64,
    /// Clips mixed under the image, offsets relative to `start`
    pub audio: Vec<AudioLayer>,
}

impl Flashcard {
    /// Lay out one card: the voice on beat one with a quiet click under it,
    /// then a click on each remaining beat.
    pub fn new(label: &NoteLabel, start: f64, render: &RenderConfig) -> Self {
        let duration = render.effective_frame_duration();

        let click = |offset: f64, volume: f64| AudioLayer {
            kind: LayerKind::Click,
            path: render.click_sound.clone(),
            offset,
            volume,
            length: Some(render.click_length),
        };

        let mut audio = vec![
            AudioLayer {
                kind: LayerKind::Voice,
                path: voice_path(&render.audio_dir, label),
                offset: 0.0,
                volume: 1.0,
                length: None,
            },
            click(0.0, render.click_under_voice_volume),
        ];
        audio.extend(
            beat_offsets(duration)
                .into_iter()
                .skip(1)
                .map(|offset| click(offset, render.click_volume)),
        );

        Self {
            label: label.clone(),
            display_text: label.display_text(),
            image: image_path(&render.images_dir, label),
            start,
            duration,
            audio,
        }
    }

    /// Seconds from the start of the video at which this card ends
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Everything a compositor needs to produce the quiz video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPlan {
    /// Video file to produce
    pub output: PathBuf,
    pub fps: u32,
    pub video_codec: String,
    pub audio_codec: String,
    /// Cards in playback order
    pub cards: Vec<Flashcard>,
}

impl VideoPlan {
    /// Build a plan placing one card per note, back to back
    pub fn build(sequence: &Sequence, render: &RenderConfig, output: impl Into<PathBuf>) -> Self {
        let mut start = 0.0;
        let mut cards = Vec::with_capacity(sequence.len());
        for label in sequence {
            let card = Flashcard::new(label, start, render);
            start = card.end();
            cards.push(card);
        }

        Self {
            output: output.into(),
            fps: render.fps,
            video_codec: render.video_codec.clone(),
            audio_codec: render.audio_codec.clone(),
            cards,
        }
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the plan has no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total running time in seconds
    pub fn total_duration(&self) -> f64 {
        self.cards.last().map_or(0.0, Flashcard::end)
    }

    /// Total number of video frames at the plan's frame rate
    pub fn frame_count(&self) -> u64 {
        (self.total_duration() * self.fps as f64).round() as u64
    }

    /// Load a plan from a YAML manifest
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a plan from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse render manifest")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize render manifest")
    }
}
