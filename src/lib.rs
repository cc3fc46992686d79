// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! NOTEQUIZ - note recognition drills.
//!
//! Generates randomized note sequences with no immediate repeats and plans
//! the flashcard videos built from them.

pub mod config;
pub mod generators;
pub mod music;
pub mod render;
