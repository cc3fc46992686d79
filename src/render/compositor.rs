// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Compositor backends.
//!
//! Turning a plan into an encoded video is the job of an external tool.
//! The trait below is the hand-off point; the manifest backend writes the
//! plan to disk for such a tool to pick up.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::plan::VideoPlan;

/// Trait for anything that can turn a render plan into output.
pub trait Compositor {
    /// Produce output for the given plan.
    ///
    /// # Returns
    /// * `Ok(())` once the plan has been handed off
    /// * `Err` if the output could not be written
    fn composite(&mut self, plan: &VideoPlan) -> Result<()>;

    /// Short backend name for log messages
    fn name(&self) -> &'static str;
}

/// Writes the plan as a YAML manifest
#[derive(Debug, Clone)]
pub struct ManifestCompositor {
    path: PathBuf,
}

impl ManifestCompositor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the manifest is written
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Compositor for ManifestCompositor {
    fn composite(&mut self, plan: &VideoPlan) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create manifest directory: {:?}", parent))?;
        }

        let yaml = plan.to_yaml()?;
        fs::write(&self.path, yaml)
            .with_context(|| format!("Failed to write manifest: {:?}", self.path))?;

        info!(
            manifest = %self.path.display(),
            cards = plan.len(),
            seconds = plan.total_duration(),
            "render manifest written"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}

/// Files referenced by the plan that do not exist on disk.
///
/// Each path is reported once, in first-use order.
pub fn missing_assets(plan: &VideoPlan) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = Vec::new();
    let paths = plan.cards.iter().flat_map(|card| {
        std::iter::once(&card.image).chain(card.audio.iter().map(|layer| &layer.path))
    });
    for path in paths {
        if !path.exists() && !missing.contains(path) {
            missing.push(path.clone());
        }
    }
    missing
}

/// Hand a plan to a compositor, warning about assets it will not find
pub fn run(compositor: &mut dyn Compositor, plan: &VideoPlan) -> Result<()> {
    for path in missing_assets(plan) {
        warn!(path = %path.display(), "asset referenced by plan is missing");
    }
    debug!(backend = compositor.name(), cards = plan.len(), "compositing");
    compositor.composite(plan)
}
