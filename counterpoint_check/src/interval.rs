// Pitch-class interval arithmetic.
//
// The interval between two pitches is the representative of (a - b) mod 12
// in [0, 11]. Direction matters: interval(62, 60) is 2, interval(60, 62)
// is 10. The banned set {0, 5, 7} is closed under that reversal (5 and 7
// swap, 0 stays), so banned-ness itself does not depend on which voice is
// listed first.

/// Intervals whose repetition across consecutive steps is a violation:
/// unison/octave, perfect fourth, perfect fifth.
pub const BANNED_INTERVALS: [u8; 3] = [0, 5, 7];

/// The pitch-class interval (a - b) mod 12, always in [0, 11].
///
/// Uses true mathematical modulo, not the host remainder: negative
/// differences (a below b, possibly by more than an octave) still map into
/// [0, 11]. Total over all integers.
pub fn pitch_class_interval(a: i64, b: i64) -> u8 {
    (a - b).rem_euclid(12) as u8
}

/// Whether an interval belongs to the banned set.
pub fn is_banned(interval: u8) -> bool {
    BANNED_INTERVALS.contains(&interval)
}
