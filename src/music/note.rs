// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note labels and the alphabets they are drawn from.
//!
//! A label is an opaque name such as "C" or "B#". Beyond equality the only
//! structure we care about is the trailing accidental, which decides how the
//! label is spelled on screen, spoken aloud, and mapped to asset files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Musical sharp sign (U+266F)
pub const SHARP_SIGN: char = '\u{266F}';
/// Musical flat sign (U+266D)
pub const FLAT_SIGN: char = '\u{266D}';

/// Accidental attached to a note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    /// Parse the ASCII spelling used in labels
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// Suffix used in asset file names
    pub fn file_suffix(self) -> &'static str {
        match self {
            Accidental::Sharp => "_sharp",
            Accidental::Flat => "_flat",
        }
    }

    /// Glyph drawn on the flashcard
    pub fn glyph(self) -> char {
        match self {
            Accidental::Sharp => SHARP_SIGN,
            Accidental::Flat => FLAT_SIGN,
        }
    }

    /// Word read out by speech synthesis
    pub fn word(self) -> &'static str {
        match self {
            Accidental::Sharp => "sharp",
            Accidental::Flat => "flat",
        }
    }
}

/// A single note name, e.g. "C" or "B#"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteLabel(String);

impl NoteLabel {
    /// Create a label from any string-like value
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into the leading letter and the rest.
    ///
    /// The first character is never an accidental, so "B" stays a B natural
    /// rather than being read as a flat.
    fn split(&self) -> (&str, &str) {
        match self.0.char_indices().nth(1) {
            Some((idx, _)) => self.0.split_at(idx),
            None => (self.0.as_str(), ""),
        }
    }

    /// Translate each accidental in the tail, leaving other characters alone
    fn map_tail<F>(&self, mut f: F) -> String
    where
        F: FnMut(&mut String, Option<Accidental>, char),
    {
        let (head, tail) = self.split();
        let mut out = String::from(head);
        for c in tail.chars() {
            f(&mut out, Accidental::from_char(c), c);
        }
        out
    }

    /// Asset file stem: "B#" -> "B_sharp", "Eb" -> "E_flat"
    pub fn file_stem(&self) -> String {
        self.map_tail(|out, acc, c| match acc {
            Some(acc) => out.push_str(acc.file_suffix()),
            None => out.push(c),
        })
    }

    /// Text drawn on the flashcard, with proper music glyphs
    pub fn display_text(&self) -> String {
        self.map_tail(|out, acc, c| out.push(acc.map_or(c, Accidental::glyph)))
    }

    /// Text handed to speech synthesis: "B#" -> "B sharp"
    pub fn spoken_name(&self) -> String {
        self.map_tail(|out, acc, c| match acc {
            Some(acc) => {
                out.push(' ');
                out.push_str(acc.word());
            }
            None => out.push(c),
        })
    }
}

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NoteLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The full set of spellings the flashcard assets exist for
#[rustfmt::skip]
pub const CHROMATIC_LABELS: [&str; 21] = [
    "Ab", "A", "A#",
    "Bb", "B", "B#",
    "Cb", "C", "C#",
    "Db", "D", "D#",
    "Eb", "E", "E#",
    "Fb", "F", "F#",
    "Gb", "G", "G#",
];

/// Labels drilled when nothing else is configured
pub const DEFAULT_LABELS: [&str; 4] = ["B#", "C", "D", "E"];

/// Distinct labels eligible for sampling, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NoteLabel>", into = "Vec<NoteLabel>")]
pub struct NoteAlphabet {
    labels: Vec<NoteLabel>,
}

impl NoteAlphabet {
    /// Build an alphabet, dropping repeated labels
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<NoteLabel>,
    {
        let mut unique: Vec<NoteLabel> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { labels: unique }
    }

    /// All 21 natural, sharp and flat spellings
    pub fn chromatic() -> Self {
        Self::new(CHROMATIC_LABELS)
    }

    /// Parse a comma separated list such as "B#, C, D"
    pub fn parse_list(s: &str) -> Self {
        Self::new(s.split(',').map(str::trim).filter(|l| !l.is_empty()))
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if there are no labels at all
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check membership
    pub fn contains(&self, label: &NoteLabel) -> bool {
        self.labels.contains(label)
    }

    /// Labels as a slice
    pub fn labels(&self) -> &[NoteLabel] {
        &self.labels
    }

    /// Iterate over labels
    pub fn iter(&self) -> std::slice::Iter<'_, NoteLabel> {
        self.labels.iter()
    }
}

impl Default for NoteAlphabet {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS)
    }
}

impl From<Vec<NoteLabel>> for NoteAlphabet {
    fn from(labels: Vec<NoteLabel>) -> Self {
        Self::new(labels)
    }
}

impl From<NoteAlphabet> for Vec<NoteLabel> {
    fn from(alphabet: NoteAlphabet) -> Self {
        alphabet.labels
    }
}

impl<'a> IntoIterator for &'a NoteAlphabet {
    type Item = &'a NoteLabel;
    type IntoIter = std::slice::Iter<'a, NoteLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
