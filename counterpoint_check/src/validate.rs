// Validation: length checking, then motion detection, then the verdict.
//
// Length must be checked first — a short voice would make the timeline
// indexing ill-defined — and a mismatch short-circuits everything else.
// The motion scan never stops at the first finding: the error carries the
// complete ordered list of violation sites. Voice numbers are 0-based
// internally and 1-based in every rendered message.

use crate::composition::Composition;
use crate::motion::detect_motion;
use crate::timeline::{PairMatrix, build_timeline};
use serde::Serialize;
use thiserror::Error;

/// One detected parallel-motion site. `lower_voice < upper_voice`, both
/// 0-based; `time` is the earlier of the two steps involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub time: usize,
    pub lower_voice: usize,
    pub upper_voice: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more voices disagree with the first voice's step count.
    #[error("{}", length_mismatch_text(.expected, .mismatched))]
    LengthMismatch {
        expected: usize,
        /// Every disagreeing voice as (0-based index, actual length).
        mismatched: Vec<(usize, usize)>,
    },

    /// Banned intervals held across consecutive steps, every site listed.
    #[error("{}", parallel_motion_text(.violations))]
    ParallelMotion { violations: Vec<Violation> },
}

/// Hooks invoked with the derived matrices before the verdict is computed.
///
/// Replaces ad-hoc debug printing: the CLI installs a dumping observer
/// under a flag, tests can capture intermediates, and observation cannot
/// alter the result. Both hooks default to doing nothing.
pub trait AnalysisObserver {
    fn on_timeline(&mut self, _timeline: &[PairMatrix<u8>]) {}
    fn on_motion(&mut self, _motion: &[PairMatrix<bool>]) {}
}

/// The no-op observer.
impl AnalysisObserver for () {}

impl Composition {
    /// Validate this composition: length check, then parallel-motion scan.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_with_observer(self, &mut ())
    }
}

pub fn validate_with_observer(
    composition: &Composition,
    observer: &mut dyn AnalysisObserver,
) -> Result<(), ValidationError> {
    check_lengths(composition)?;

    let timeline = build_timeline(composition);
    observer.on_timeline(&timeline);
    let motion = detect_motion(&timeline);
    observer.on_motion(&motion);

    let mut violations = Vec::new();
    for (time, flags) in motion.iter().enumerate() {
        let num_voices = flags.num_voices();
        for i in 0..num_voices {
            for j in (i + 1)..num_voices {
                if flags.get(i, j) {
                    violations.push(Violation {
                        time,
                        lower_voice: i,
                        upper_voice: j,
                    });
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::ParallelMotion { violations })
    }
}

fn check_lengths(composition: &Composition) -> Result<(), ValidationError> {
    let expected = composition.length();
    let mismatched: Vec<(usize, usize)> = composition
        .voices()
        .iter()
        .enumerate()
        .filter(|(_, voice)| voice.len() != expected)
        .map(|(index, voice)| (index, voice.len()))
        .collect();

    if mismatched.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch {
            expected,
            mismatched,
        })
    }
}

fn length_mismatch_text(expected: &usize, mismatched: &[(usize, usize)]) -> String {
    let mut out = format!("voice lengths disagree (expected {expected} steps)");
    for (index, actual) in mismatched {
        out.push_str(&format!("\n  voice {} has {} steps", index + 1, actual));
    }
    out
}

fn parallel_motion_text(violations: &[Violation]) -> String {
    let plural = if violations.len() == 1 { "" } else { "s" };
    let mut out = format!("found {} parallel motion violation{plural}", violations.len());
    for v in violations {
        out.push_str(&format!(
            "\n  parallel motion at time {} between voices {} and {}",
            v.time,
            v.lower_voice + 1,
            v.upper_voice + 1
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Voice;

    fn comp(rows: &[&[u8]]) -> Composition {
        Composition::new(
            rows.iter()
                .enumerate()
                .map(|(k, row)| Voice::new(format!("v{k}"), row.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_length_mismatch_lists_offenders() {
        let comp = comp(&[&[60, 62, 64, 65], &[55, 57, 59, 60], &[48, 50, 52, 53], &[41, 43, 45]]);
        let err = comp.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                expected: 4,
                mismatched: vec![(3, 3)],
            }
        );
        let text = err.to_string();
        assert!(text.contains("expected 4 steps"));
        assert!(text.contains("voice 4 has 3 steps"));
    }

    #[test]
    fn test_length_check_runs_before_motion() {
        // Parallel fifths in the first two voices, but the third voice is
        // short: the length error must win.
        let comp = comp(&[&[67, 69], &[60, 62], &[48]]);
        assert!(matches!(
            comp.validate(),
            Err(ValidationError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_parallel_fifths_reported() {
        let comp = comp(&[&[67, 69], &[60, 62]]);
        let err = comp.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ParallelMotion {
                violations: vec![Violation {
                    time: 0,
                    lower_voice: 0,
                    upper_voice: 1,
                }],
            }
        );
        let text = err.to_string();
        assert!(text.contains("parallel motion at time 0 between voices 1 and 2"));
    }

    #[test]
    fn test_all_violations_collected_in_order() {
        // Three voices a fifth apart moving in lockstep: every pair whose
        // interval is banned is reported at every step but the last.
        // Pairs: (0,1) fifth (7), (1,2) fifth (7), (0,2) 14 semitones = 2.
        let comp = comp(&[&[74, 76, 78], &[67, 69, 71], &[60, 62, 64]]);
        let err = comp.validate().unwrap_err();
        let ValidationError::ParallelMotion { violations } = err else {
            panic!("expected parallel motion");
        };
        assert_eq!(
            violations,
            vec![
                Violation { time: 0, lower_voice: 0, upper_voice: 1 },
                Violation { time: 0, lower_voice: 1, upper_voice: 2 },
                Violation { time: 1, lower_voice: 0, upper_voice: 1 },
                Violation { time: 1, lower_voice: 1, upper_voice: 2 },
            ]
        );
    }

    #[test]
    fn test_clean_four_voices_with_loop_validate() {
        // Four voices in lockstep a minor third apart: every pairwise
        // interval is 3, 6, or 9 at every step, none banned. Closing the
        // loop keeps the lockstep across the seam.
        let rows: Vec<Vec<u8>> = [60u8, 57, 54, 51]
            .iter()
            .map(|&base| vec![base, base + 2, base + 4, base + 2])
            .collect();
        let mut voices: Vec<Voice> = rows
            .into_iter()
            .enumerate()
            .map(|(k, row)| Voice::new(format!("v{k}"), row))
            .collect();
        for voice in &mut voices {
            voice.close_loop();
        }
        let comp = Composition::new(voices);
        assert_eq!(comp.length(), 5);
        assert_eq!(comp.validate(), Ok(()));
    }

    #[test]
    fn test_loop_seam_violation_detected() {
        // Within the row the fifth is never held, but closing the loop
        // makes the last step wrap to the first: fifth at t=2 and t=3.
        let mut high = Voice::new("high", vec![67, 64, 67]);
        let mut low = Voice::new("low", vec![60, 62, 60]);
        high.close_loop();
        low.close_loop();
        let comp = Composition::new(vec![high, low]);
        let err = comp.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ParallelMotion {
                violations: vec![Violation {
                    time: 2,
                    lower_voice: 0,
                    upper_voice: 1,
                }],
            }
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let comp = comp(&[&[67, 69, 64], &[60, 62, 60]]);
        let first = comp.validate();
        let second = comp.validate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_observer_sees_matrices_without_changing_verdict() {
        struct Capture {
            timeline_len: usize,
            motion_len: usize,
        }
        impl AnalysisObserver for Capture {
            fn on_timeline(&mut self, timeline: &[PairMatrix<u8>]) {
                self.timeline_len = timeline.len();
            }
            fn on_motion(&mut self, motion: &[PairMatrix<bool>]) {
                self.motion_len = motion.len();
            }
        }

        let comp = comp(&[&[67, 69], &[60, 62]]);
        let mut capture = Capture {
            timeline_len: 0,
            motion_len: 0,
        };
        let observed = validate_with_observer(&comp, &mut capture);
        assert_eq!(capture.timeline_len, 2);
        assert_eq!(capture.motion_len, 2);
        assert_eq!(observed, comp.validate());
    }

    #[test]
    fn test_trivial_compositions_validate() {
        assert_eq!(comp(&[]).validate(), Ok(()));
        assert_eq!(comp(&[&[60, 62, 64]]).validate(), Ok(()));
        assert_eq!(comp(&[&[], &[]]).validate(), Ok(()));
    }
}
