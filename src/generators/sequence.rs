// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random note sequences for recognition drills.
//!
//! The first two notes are drawn as a distinct pair. Every later note is
//! drawn uniformly from the alphabet minus the note just played, so the
//! same note never appears twice in a row.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::music::{NoteAlphabet, NoteLabel};

/// Reasons a sequence cannot be generated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Too few distinct labels to satisfy the requested length
    #[error(
        "alphabet has {available} distinct note(s), need at least {required} for a sequence of {length}"
    )]
    InvalidAlphabet {
        available: usize,
        required: usize,
        length: i64,
    },
    /// Negative length requested
    #[error("sequence length must not be negative, got {0}")]
    InvalidLength(i64),
}

/// An ordered list of note labels with no immediate repeats
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    notes: Vec<NoteLabel>,
}

impl Sequence {
    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True for the zero-length sequence
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in order
    pub fn notes(&self) -> &[NoteLabel] {
        &self.notes
    }

    /// Iterate over notes in order
    pub fn iter(&self) -> std::slice::Iter<'_, NoteLabel> {
        self.notes.iter()
    }

    /// Comma-space joined labels, e.g. "C, D, B#"
    pub fn to_text(&self) -> String {
        self.notes
            .iter()
            .map(NoteLabel::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Write the joined labels to a plain text file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_text())
            .with_context(|| format!("Failed to write sequence file: {:?}", path.as_ref()))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a NoteLabel;
    type IntoIter = std::slice::Iter<'a, NoteLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

/// Upper bound on the up-front allocation for a sequence; longer sequences
/// grow as notes are pushed.
pub const MAX_PREALLOCATED_NOTES: usize = 4096;

fn initial_capacity(count: usize) -> usize {
    count.min(MAX_PREALLOCATED_NOTES)
}

/// Check that `alphabet` can produce a sequence of `length` notes
pub fn check_request(alphabet: &NoteAlphabet, length: i64) -> Result<usize, SequenceError> {
    if length < 0 {
        return Err(SequenceError::InvalidLength(length));
    }
    let required = length.min(2) as usize;
    if alphabet.len() < required {
        return Err(SequenceError::InvalidAlphabet {
            available: alphabet.len(),
            required,
            length,
        });
    }
    usize::try_from(length).map_err(|_| SequenceError::InvalidLength(length))
}

/// Generate `length` notes from `alphabet` using the supplied random source.
///
/// Length 0 yields an empty sequence for any alphabet. All preconditions are
/// checked before the first draw.
pub fn generate_sequence<R>(
    alphabet: &NoteAlphabet,
    length: i64,
    rng: &mut R,
) -> Result<Sequence, SequenceError>
where
    R: Rng + ?Sized,
{
    let count = check_request(alphabet, length)?;
    let labels = alphabet.labels();
    let mut notes = Vec::with_capacity(initial_capacity(count));

    if count == 0 {
        return Ok(Sequence { notes });
    }
    if count == 1 {
        notes.push(labels[rng.gen_range(0..labels.len())].clone());
        return Ok(Sequence { notes });
    }

    // Distinct opening pair, drawn without replacement
    let pair = index::sample(rng, labels.len(), 2);
    let mut last = pair.index(1);
    notes.push(labels[pair.index(0)].clone());
    notes.push(labels[last].clone());

    for _ in 2..count {
        // Uniform over every index except `last`: draw from one fewer slot
        // and step over the excluded position.
        let mut next = rng.gen_range(0..labels.len() - 1);
        if next >= last {
            next += 1;
        }
        notes.push(labels[next].clone());
        last = next;
    }

    Ok(Sequence { notes })
}

/// Sequence generator owning its random source
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    alphabet: NoteAlphabet,
    rng: StdRng,
}

impl SequenceGenerator {
    /// Create a generator seeded from system entropy
    pub fn new(alphabet: NoteAlphabet) -> Self {
        Self {
            alphabet,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed for reproducible drills
    pub fn with_seed(alphabet: NoteAlphabet, seed: u64) -> Self {
        Self {
            alphabet,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator with an optional seed
    pub fn from_seed_option(alphabet: NoteAlphabet, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(alphabet, seed),
            None => Self::new(alphabet),
        }
    }

    /// The alphabet notes are drawn from
    pub fn alphabet(&self) -> &NoteAlphabet {
        &self.alphabet
    }

    /// Generate the next sequence of `length` notes
    pub fn generate(&mut self, length: i64) -> Result<Sequence, SequenceError> {
        generate_sequence(&self.alphabet, length, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill_alphabet() -> NoteAlphabet {
        NoteAlphabet::new(["B#", "C", "D", "E"])
    }

    fn assert_valid(seq: &Sequence, alphabet: &NoteAlphabet) {
        for note in seq {
            assert!(alphabet.contains(note), "{} not in alphabet", note);
        }
        for pair in seq.notes().windows(2) {
            assert_ne!(pair[0], pair[1], "immediate repeat in {}", seq.to_text());
        }
    }

    #[test]
    fn test_sequence_length_and_membership() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(7);
        for length in 2..40 {
            let seq = generate_sequence(&alphabet, length, &mut rng).unwrap();
            assert_eq!(seq.len(), length as usize);
            assert_valid(&seq, &alphabet);
        }
    }

    #[test]
    fn test_opening_pair_distinct() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let seq = generate_sequence(&alphabet, 2, &mut rng).unwrap();
            assert_ne!(seq.notes()[0], seq.notes()[1]);
        }
    }

    #[test]
    fn test_two_note_alphabet_alternates() {
        let alphabet = NoteAlphabet::new(["C", "D"]);
        let mut rng = StdRng::seed_from_u64(3);
        let seq = generate_sequence(&alphabet, 10, &mut rng).unwrap();
        assert_valid(&seq, &alphabet);
        for (i, note) in seq.iter().enumerate() {
            assert_eq!(note, &seq.notes()[i % 2]);
        }
    }

    #[test]
    fn test_zero_length() {
        let mut rng = StdRng::seed_from_u64(0);
        let seq = generate_sequence(&drill_alphabet(), 0, &mut rng).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.to_text(), "");

        let empty = NoteAlphabet::new(Vec::<NoteLabel>::new());
        assert!(generate_sequence(&empty, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_single_note() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(5);
        let seq = generate_sequence(&alphabet, 1, &mut rng).unwrap();
        assert_eq!(seq.len(), 1);
        assert!(alphabet.contains(&seq.notes()[0]));

        // One label is enough for a single note
        let solo = NoteAlphabet::new(["A"]);
        let seq = generate_sequence(&solo, 1, &mut rng).unwrap();
        assert_eq!(seq.to_text(), "A");
    }

    #[test]
    fn test_alphabet_too_small() {
        let mut rng = StdRng::seed_from_u64(0);
        let solo = NoteAlphabet::new(["A"]);
        assert_eq!(
            generate_sequence(&solo, 2, &mut rng),
            Err(SequenceError::InvalidAlphabet {
                available: 1,
                required: 2,
                length: 2
            })
        );

        let empty = NoteAlphabet::new(Vec::<NoteLabel>::new());
        assert!(matches!(
            generate_sequence(&empty, 1, &mut rng),
            Err(SequenceError::InvalidAlphabet { available: 0, .. })
        ));
    }

    #[test]
    fn test_negative_length() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_sequence(&drill_alphabet(), -1, &mut rng),
            Err(SequenceError::InvalidLength(-1))
        );
        // Length is checked before the alphabet
        let empty = NoteAlphabet::new(Vec::<NoteLabel>::new());
        assert_eq!(
            generate_sequence(&empty, -3, &mut rng),
            Err(SequenceError::InvalidLength(-3))
        );
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = SequenceGenerator::with_seed(drill_alphabet(), 42);
        let mut b = SequenceGenerator::with_seed(drill_alphabet(), 42);
        let first = a.generate(30).unwrap();
        assert_eq!(first, b.generate(30).unwrap());
        assert_eq!(first.len(), 30);
        assert_valid(&first, a.alphabet());
    }

    #[test]
    fn test_huge_length_capacity_is_bounded() {
        assert_eq!(initial_capacity(0), 0);
        assert_eq!(initial_capacity(30), 30);
        assert_eq!(initial_capacity(usize::MAX), MAX_PREALLOCATED_NOTES);
        let count = check_request(&drill_alphabet(), i64::MAX).unwrap();
        assert_eq!(initial_capacity(count), MAX_PREALLOCATED_NOTES);
        // Allocating the bounded capacity must not overflow
        let notes: Vec<NoteLabel> = Vec::with_capacity(initial_capacity(count));
        assert!(notes.capacity() >= MAX_PREALLOCATED_NOTES);
    }

    #[test]
    fn test_lengths_past_preallocation() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(17);
        let length = MAX_PREALLOCATED_NOTES as i64 + 10;
        let seq = generate_sequence(&alphabet, length, &mut rng).unwrap();
        assert_eq!(seq.len(), length as usize);
        assert_valid(&seq, &alphabet);
    }

    #[test]
    fn test_successors_uniform() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(2718);
        let seq = generate_sequence(&alphabet, 120_000, &mut rng).unwrap();

        let index = |label: &NoteLabel| alphabet.iter().position(|l| l == label).unwrap();
        let mut counts = [[0u32; 4]; 4];
        for pair in seq.notes().windows(2) {
            counts[index(&pair[0])][index(&pair[1])] += 1;
        }

        for (prev, row) in counts.iter().enumerate() {
            assert_eq!(row[prev], 0);
            let total: u32 = row.iter().sum();
            assert!(total > 20_000, "too few successors of {}", prev);
            for (next, &count) in row.iter().enumerate() {
                if next == prev {
                    continue;
                }
                let share = count as f64 / total as f64;
                assert!(
                    (share - 1.0 / 3.0).abs() < 0.02,
                    "{} -> {} share {:.4}",
                    prev,
                    next,
                    share
                );
            }
        }
    }

    #[test]
    fn test_single_note_uniform() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(314);
        let mut counts = [0u32; 4];
        let draws = 40_000;
        for _ in 0..draws {
            let seq = generate_sequence(&alphabet, 1, &mut rng).unwrap();
            let idx = alphabet.iter().position(|l| l == &seq.notes()[0]).unwrap();
            counts[idx] += 1;
        }
        for (idx, &count) in counts.iter().enumerate() {
            let share = count as f64 / draws as f64;
            assert!((share - 0.25).abs() < 0.02, "label {} share {:.4}", idx, share);
        }
    }

    #[test]
    fn test_opening_pair_uniform() {
        let alphabet = drill_alphabet();
        let mut rng = StdRng::seed_from_u64(1618);
        let mut counts = [[0u32; 4]; 4];
        let draws = 48_000;
        for _ in 0..draws {
            let seq = generate_sequence(&alphabet, 2, &mut rng).unwrap();
            let a = alphabet.iter().position(|l| l == &seq.notes()[0]).unwrap();
            let b = alphabet.iter().position(|l| l == &seq.notes()[1]).unwrap();
            counts[a][b] += 1;
        }
        // 12 ordered distinct pairs, each about 1/12
        for (a, row) in counts.iter().enumerate() {
            for (b, &count) in row.iter().enumerate() {
                if a == b {
                    assert_eq!(count, 0);
                } else {
                    let share = count as f64 / draws as f64;
                    assert!((share - 1.0 / 12.0).abs() < 0.01, "{}{} share {:.4}", a, b, share);
                }
            }
        }
    }

    #[test]
    fn test_every_note_reachable() {
        let alphabet = drill_alphabet();
        let mut generator = SequenceGenerator::with_seed(alphabet.clone(), 99);
        let seq = generator.generate(400).unwrap();
        for label in &alphabet {
            assert!(seq.iter().any(|n| n == label), "{} never drawn", label);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = SequenceError::InvalidLength(-2);
        assert!(err.to_string().contains("-2"));
        let err = SequenceError::InvalidAlphabet {
            available: 1,
            required: 2,
            length: 5,
        };
        assert!(err.to_string().contains("1 distinct"));
    }

    #[test]
    fn test_save_writes_joined_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut generator = SequenceGenerator::with_seed(drill_alphabet(), 1);
        let seq = generator.generate(5).unwrap();
        seq.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, seq.to_text());
        assert_eq!(written.split(", ").count(), 5);
    }
}
