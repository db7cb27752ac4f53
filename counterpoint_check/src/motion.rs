// Parallel-motion detection over the interval timeline.
//
// A pair (i, j) is flagged at step t when its interval is banned and
// unchanged at step t+1. Only the interval class is compared: a fifth held
// through an octave transposition still counts, and so does a pair that
// does not move at all. The final step has no successor and is never
// flagged — with the default loop augmentation the seam back to the start
// has already been materialized as an ordinary consecutive step.

use crate::interval::is_banned;
use crate::timeline::PairMatrix;

/// Flag every (t, i, j) where a banned interval is held from t to t+1.
///
/// The result has the same length as the timeline; the matrix for the last
/// step is all-false.
pub fn detect_motion(timeline: &[PairMatrix<u8>]) -> Vec<PairMatrix<bool>> {
    timeline
        .iter()
        .enumerate()
        .map(|(t, current)| {
            let num_voices = current.num_voices();
            let mut flags = PairMatrix::new(num_voices);
            if let Some(next) = timeline.get(t + 1) {
                for i in 0..num_voices {
                    for j in (i + 1)..num_voices {
                        let iv = current.get(i, j);
                        if is_banned(iv) && next.get(i, j) == iv {
                            flags.set(i, j, true);
                        }
                    }
                }
            }
            flags
        })
        .collect()
}
