// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note naming for the quiz.
//!
//! This module provides note labels, the alphabets they are sampled from,
//! and the spelling rules that tie a label to its image and voice assets.

pub mod note;

pub use note::{Accidental, NoteAlphabet, NoteLabel, FLAT_SIGN, SHARP_SIGN};
