// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Asset naming for flashcards.
//!
//! Every label maps to exactly one image and one voice clip, named after
//! `NoteLabel::file_stem`. The assets themselves are produced once, up
//! front, by external image and speech tools.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::music::{NoteAlphabet, NoteLabel};

/// Image shown for a label
pub fn image_path(images_dir: &Path, label: &NoteLabel) -> PathBuf {
    images_dir.join(format!("{}.png", label.file_stem()))
}

/// Spoken clip played for a label
pub fn voice_path(audio_dir: &Path, label: &NoteLabel) -> PathBuf {
    audio_dir.join(format!("{}.wav", label.file_stem()))
}

/// What has to exist on disk for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub label: NoteLabel,
    /// Text to rasterize onto the card
    pub display_text: String,
    /// Text to synthesize
    pub spoken_name: String,
    pub image: PathBuf,
    pub voice: PathBuf,
}

impl AssetEntry {
    pub fn new(label: &NoteLabel, render: &RenderConfig) -> Self {
        Self {
            label: label.clone(),
            display_text: label.display_text(),
            spoken_name: label.spoken_name(),
            image: image_path(&render.images_dir, label),
            voice: voice_path(&render.audio_dir, label),
        }
    }

    /// True when both the image and the voice clip exist
    pub fn is_present(&self) -> bool {
        self.image.is_file() && self.voice.is_file()
    }
}

/// Asset requirements for every label of an alphabet
pub fn asset_table(alphabet: &NoteAlphabet, render: &RenderConfig) -> Vec<AssetEntry> {
    alphabet
        .iter()
        .map(|label| AssetEntry::new(label, render))
        .collect()
}
