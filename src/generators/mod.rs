// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engines for drill content.
//!
//! Generators take an alphabet of note labels and a random source and
//! produce the ordered material a quiz is built from.

pub mod sequence;

pub use sequence::{generate_sequence, Sequence, SequenceError, SequenceGenerator};
