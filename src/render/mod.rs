// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Flashcard video planning.
//!
//! This module maps a note sequence onto a timeline of image and audio
//! clips and hands the result to a compositor backend.

pub mod assets;
pub mod compositor;
pub mod plan;
pub mod timing;

pub use assets::{asset_table, image_path, voice_path, AssetEntry};
pub use compositor::{missing_assets, Compositor, ManifestCompositor};
pub use plan::{AudioLayer, Flashcard, LayerKind, VideoPlan};
