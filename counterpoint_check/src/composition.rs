// The composition: the central representation for analysis.
//
// A composition is an ordered list of voices, each a row of MIDI pitches at
// a fixed step granularity. Voice order is significant: it defines the
// (i, j) pair indices used by the timeline and every violation report.
//
// The composition is built once by the loader and never mutated afterwards.
// Everything the analyzer derives from it (interval timelines, motion
// matrices, violation lists) is recomputed from this source of truth.

/// One melodic line: a named, ordered row of MIDI pitches (middle C = 60).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    name: String,
    pitches: Vec<u8>,
}

impl Voice {
    pub fn new(name: impl Into<String>, pitches: Vec<u8>) -> Self {
        Voice {
            name: name.into(),
            pitches,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }

    /// Number of time steps in this voice.
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Append the first pitch to the end, so the loop seam (last step →
    /// first step) is covered by the same consecutive-step rule as any
    /// other pair of steps. No-op on an empty voice.
    pub fn close_loop(&mut self) {
        if let Some(&first) = self.pitches.first() {
            self.pitches.push(first);
        }
    }

    /// Compact one-line rendering of the voice using note names.
    pub fn render_line(&self) -> String {
        self.pitches
            .iter()
            .map(|&p| pitch_name(p))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The complete composition: ordered voices plus their common step count.
///
/// `length` is taken from the first voice (0 with no voices). Construction
/// does not check that every voice agrees — the validator does, so that the
/// mismatch error can report every offending voice at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    voices: Vec<Voice>,
    length: usize,
}

impl Composition {
    pub fn new(voices: Vec<Voice>) -> Self {
        let length = voices.first().map(Voice::len).unwrap_or(0);
        Composition { voices, length }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn num_voices(&self) -> usize {
        self.voices.len()
    }

    /// The common number of time steps across all voices.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Convert a MIDI pitch to a compact note name (e.g., "C4", "F#3").
pub fn pitch_name(pitch: u8) -> &'static str {
    const NAMES: &[&str] = &[
        "C0", "C#0", "D0", "Eb0", "E0", "F0", "F#0", "G0", "Ab0", "A0", "Bb0", "B0", "C1", "C#1",
        "D1", "Eb1", "E1", "F1", "F#1", "G1", "Ab1", "A1", "Bb1", "B1", "C2", "C#2", "D2", "Eb2",
        "E2", "F2", "F#2", "G2", "Ab2", "A2", "Bb2", "B2", "C3", "C#3", "D3", "Eb3", "E3", "F3",
        "F#3", "G3", "Ab3", "A3", "Bb3", "B3", "C4", "C#4", "D4", "Eb4", "E4", "F4", "F#4", "G4",
        "Ab4", "A4", "Bb4", "B4", "C5", "C#5", "D5", "Eb5", "E5", "F5", "F#5", "G5", "Ab5", "A5",
        "Bb5", "B5", "C6", "C#6", "D6", "Eb6", "E6", "F6", "F#6", "G6", "Ab6", "A6", "Bb6", "B6",
        "C7", "C#7", "D7", "Eb7", "E7", "F7", "F#7", "G7", "Ab7", "A7", "Bb7", "B7", "C8", "C#8",
        "D8", "Eb8", "E8", "F8", "F#8", "G8", "Ab8", "A8", "Bb8", "B8",
    ];
    if (pitch as usize) < NAMES.len() {
        NAMES[pitch as usize]
    } else {
        "??"
    }
}
