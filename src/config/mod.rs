// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for NOTEQUIZ.
//!
//! A quiz file describes which notes are drilled, how each flashcard is
//! timed and mixed, and where the generated artifacts are written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generators::sequence::{check_request, SequenceError};
use crate::music::NoteAlphabet;
use crate::render::timing::frame_duration_for_bpm;

/// Semantic problems in an otherwise well-formed quiz file
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    VolumeOutOfRange { field: &'static str, value: f64 },
    #[error("quiz cannot be generated: {0}")]
    Sequence(#[from] SequenceError),
}

/// Root configuration for a quiz
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QuizFile {
    /// What to drill
    #[serde(default)]
    pub quiz: QuizConfig,
    /// Flashcard timing, mixing and encoder settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl QuizFile {
    /// Load a quiz configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a quiz configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check values that parse fine but cannot produce a quiz
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_request(&self.quiz.notes, self.quiz.count)?;

        let render = &self.render;
        positive("render.frame_duration", render.frame_duration)?;
        if let Some(bpm) = render.bpm {
            positive("render.bpm", bpm)?;
        }
        positive("render.fps", render.fps as f64)?;
        positive("render.click_length", render.click_length)?;
        volume("render.click_volume", render.click_volume)?;
        volume("render.click_under_voice_volume", render.click_under_voice_volume)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn volume(field: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::VolumeOutOfRange { field, value })
    }
}

/// Load and validate a quiz file without generating anything
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<QuizFile> {
    let config = QuizFile::load(path.as_ref())?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))?;
    Ok(config)
}

/// Which notes are drilled and how many
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizConfig {
    /// Alphabet of note labels
    #[serde(default)]
    pub notes: NoteAlphabet,
    /// Number of flashcards
    #[serde(default = "default_count")]
    pub count: i64,
    /// Fixed seed for reproducible quizzes
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_count() -> i64 {
    30
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            notes: NoteAlphabet::default(),
            count: default_count(),
            seed: None,
        }
    }
}

/// Flashcard timing, audio mix and encoder settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Seconds each flashcard is shown
    #[serde(default = "default_frame_duration")]
    pub frame_duration: f64,
    /// Tempo; when set, overrides frame_duration (one bar of 4/4 per card)
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Video frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Video codec passed to the encoder
    #[serde(default = "default_video_codec")]
    pub video_codec: String,
    /// Audio codec passed to the encoder
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    /// Directory holding one PNG per note
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Directory holding one spoken WAV per note
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    /// Metronome click sample
    #[serde(default = "default_click_sound")]
    pub click_sound: PathBuf,
    /// Seconds of the click sample kept
    #[serde(default = "default_click_length")]
    pub click_length: f64,
    /// Volume of the beat clicks
    #[serde(default = "default_click_volume")]
    pub click_volume: f64,
    /// Volume of the click played under the voice
    #[serde(default = "default_click_under_voice_volume")]
    pub click_under_voice_volume: f64,
}

fn default_frame_duration() -> f64 {
    2.0
}
fn default_fps() -> u32 {
    24
}
fn default_video_codec() -> String {
    "libx264".to_string()
}
fn default_audio_codec() -> String {
    "aac".to_string()
}
fn default_images_dir() -> PathBuf {
    PathBuf::from("./images")
}
fn default_audio_dir() -> PathBuf {
    PathBuf::from("./trimmed_audio")
}
fn default_click_sound() -> PathBuf {
    PathBuf::from("./click.wav")
}
fn default_click_length() -> f64 {
    0.1
}
fn default_click_volume() -> f64 {
    0.1
}
fn default_click_under_voice_volume() -> f64 {
    0.03
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_duration: default_frame_duration(),
            bpm: None,
            fps: default_fps(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            images_dir: default_images_dir(),
            audio_dir: default_audio_dir(),
            click_sound: default_click_sound(),
            click_length: default_click_length(),
            click_volume: default_click_volume(),
            click_under_voice_volume: default_click_under_voice_volume(),
        }
    }
}

impl RenderConfig {
    /// Seconds per flashcard, honoring the bpm override
    pub fn effective_frame_duration(&self) -> f64 {
        self.bpm.map_or(self.frame_duration, frame_duration_for_bpm)
    }
}

/// Where generated artifacts go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Comma separated note list
    #[serde(default = "default_sequence_file")]
    pub sequence_file: PathBuf,
    /// Video the compositor should produce
    #[serde(default = "default_video_file")]
    pub video_file: PathBuf,
    /// Render plan written for the compositor
    #[serde(default = "default_manifest_file")]
    pub manifest_file: PathBuf,
}

fn default_sequence_file() -> PathBuf {
    PathBuf::from("test-notes.txt")
}
fn default_video_file() -> PathBuf {
    PathBuf::from("./test.mp4")
}
fn default_manifest_file() -> PathBuf {
    PathBuf::from("./test-plan.yaml")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sequence_file: default_sequence_file(),
            video_file: default_video_file(),
            manifest_file: default_manifest_file(),
        }
    }
}
