// The interval timeline: one pairwise-interval matrix per time step.
//
// Each matrix is symmetric over voice pairs with no diagonal, stored as a
// flat upper triangle indexed by a canonical (i, j) offset. Reading (i, j)
// and (j, i) yields the same value; a voice has no interval with itself.

use crate::composition::Composition;
use crate::interval::pitch_class_interval;

/// A symmetric matrix over voice pairs, upper triangle only.
///
/// For `num_voices` voices it holds V·(V-1)/2 entries, one per unordered
/// pair. Indexing the diagonal is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMatrix<T> {
    num_voices: usize,
    entries: Vec<T>,
}

impl<T: Copy + Default> PairMatrix<T> {
    /// Create a matrix with every pair set to `T::default()`.
    pub fn new(num_voices: usize) -> Self {
        let pairs = num_voices * num_voices.saturating_sub(1) / 2;
        PairMatrix {
            num_voices,
            entries: vec![T::default(); pairs],
        }
    }

    pub fn num_voices(&self) -> usize {
        self.num_voices
    }

    /// Number of stored (i < j) pairs: V·(V-1)/2.
    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        self.entries[self.offset(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let offset = self.offset(i, j);
        self.entries[offset] = value;
    }

    /// Canonical flat offset for the unordered pair {i, j}.
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(i != j, "a voice has no interval with itself");
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        assert!(hi < self.num_voices, "voice index out of range");
        lo * (2 * self.num_voices - lo - 1) / 2 + (hi - lo - 1)
    }
}

/// Build the timeline: element t holds, for every pair i < j, the
/// pitch-class interval between voices[i] and voices[j] at step t.
///
/// Assumes every voice has at least `composition.length()` steps; the
/// validator's length check runs before this and a mismatch short-circuits.
pub fn build_timeline(composition: &Composition) -> Vec<PairMatrix<u8>> {
    let voices = composition.voices();
    let num_voices = voices.len();

    (0..composition.length())
        .map(|t| {
            let mut matrix = PairMatrix::new(num_voices);
            for i in 0..num_voices {
                for j in (i + 1)..num_voices {
                    let iv = pitch_class_interval(
                        i64::from(voices[i].pitches()[t]),
                        i64::from(voices[j].pitches()[t]),
                    );
                    matrix.set(i, j, iv);
                }
            }
            matrix
        })
        .collect()
}
