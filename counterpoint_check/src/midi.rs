// Voice loading from Standard MIDI Files.
//
// Each file becomes one voice: every NoteOn (velocity > 0) across all
// tracks, taken in chronological order, contributes its key to the pitch
// row. NoteOffs and durations are ignored — the analyzer only cares about
// the order of attacks. Ties at the same tick keep track order, then event
// order, so the result is deterministic for any input.
//
// Uses the `midly` crate. A failed load of any file aborts the whole
// composition; the engine never sees a partially loaded set of voices, and
// a file without notes is an error rather than an empty voice.

use crate::composition::{Composition, Voice};
use midly::{MidiMessage, Smf, TrackEventKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {} as MIDI: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: midly::Error,
    },

    #[error("{} contains no notes", .path.display())]
    NoNotes { path: PathBuf },
}

/// Load one voice from a MIDI file, named after the file stem.
pub fn load_voice(path: &Path) -> Result<Voice, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let smf = Smf::parse(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let pitches = note_attacks(&smf);
    if pitches.is_empty() {
        return Err(LoadError::NoNotes {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Voice::new(name, pitches))
}

/// Load every path in order (file order = voice order), optionally closing
/// each voice's loop, and assemble the composition. Fails on the first
/// unloadable file.
pub fn load_composition(paths: &[PathBuf], looped: bool) -> Result<Composition, LoadError> {
    let mut voices = Vec::with_capacity(paths.len());
    for path in paths {
        let mut voice = load_voice(path)?;
        if looped {
            voice.close_loop();
        }
        voices.push(voice);
    }
    Ok(Composition::new(voices))
}

/// All NoteOn keys in the file, merged across tracks in tick order.
fn note_attacks(smf: &Smf<'_>) -> Vec<u8> {
    // (absolute tick, track index, event index, key)
    let mut attacks: Vec<(u32, usize, usize, u8)> = Vec::new();
    for (track_index, track) in smf.tracks.iter().enumerate() {
        let mut tick: u32 = 0;
        for (event_index, event) in track.iter().enumerate() {
            tick += event.delta.as_int();
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                // NoteOn with velocity 0 is a NoteOff in disguise.
                if vel.as_int() > 0 {
                    attacks.push((tick, track_index, event_index, key.as_int()));
                }
            }
        }
    }
    attacks.sort();
    attacks.into_iter().map(|(_, _, _, key)| key).collect()
}
