// Counterpoint parallel-motion checker.
//
// Analyzes a multi-voice composition (one monophonic melodic line per MIDI
// file) and reports every place where two voices hold the same banned
// harmonic interval — unison/octave, perfect fourth, or perfect fifth —
// across two consecutive time steps. By default each voice is treated as a
// loop, so motion across the end-to-start seam is checked with the same
// consecutive-step rule as everything else.
//
// Architecture:
// - composition.rs: Voice and Composition data model (immutable pitch rows)
// - interval.rs: Pitch-class interval arithmetic and the banned set
// - timeline.rs: Per-step upper-triangular matrices of pairwise intervals
// - motion.rs: Flagging banned intervals held across consecutive steps
// - validate.rs: Length checking, violation aggregation, error types
// - midi.rs: Loading voices from Standard MIDI Files via midly
//
// Everything downstream of the loader is a pure derivation from the
// Composition: validating twice yields the same report, byte for byte.

pub mod composition;
pub mod interval;
pub mod midi;
pub mod motion;
pub mod timeline;
pub mod validate;
