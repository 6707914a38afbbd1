use std::fmt;

use chrono::{NaiveTime, Timelike};

/// A formatted time-of-day string, always exactly 8 bytes: `HH:MM:SS`,
/// each field zero-padded to width 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockString(String);

impl ClockString {
    /// Format a time of day.
    ///
    /// Pure and deterministic: the same `time` always yields the same
    /// string, and every representable time yields a well-formed one.
    pub fn format(time: NaiveTime) -> Self {
        let hours = two_places(time.hour());
        let minutes = two_places(time.minute());
        let seconds = two_places(time.second());

        Self(format!("{hours}:{minutes}:{seconds}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClockString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Left-pad the decimal representation of `field` with `'0'` until it is at
/// least two characters wide.
fn two_places(field: u32) -> String {
    let mut digits = field.to_string();

    while digits.len() < 2 {
        digits.insert(0, '0');
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_places_pads_single_digits() {
        for n in 0..=9 {
            assert_eq!(two_places(n), format!("0{n}"));
        }
    }

    #[test]
    fn two_places_keeps_double_digits() {
        for n in 10..=59 {
            assert_eq!(two_places(n), n.to_string());
        }
    }

    #[test]
    fn formats_known_times() {
        let cases = [
            ((7, 1, 1), "07:01:01"),
            ((23, 59, 59), "23:59:59"),
            ((0, 0, 0), "00:00:00"),
        ];

        for ((h, m, s), expected) in cases {
            let time = NaiveTime::from_hms_opt(h, m, s).expect("valid time");
            assert_eq!(ClockString::format(time).as_str(), expected);
        }
    }

    #[test]
    fn output_is_always_eight_bytes() {
        for h in [0, 9, 10, 23] {
            for ms in [0, 9, 10, 59] {
                let time = NaiveTime::from_hms_opt(h, ms, ms).expect("valid time");
                assert_eq!(ClockString::format(time).as_str().len(), 8);
            }
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let time = NaiveTime::from_hms_opt(12, 34, 56).expect("valid time");
        assert_eq!(ClockString::format(time), ClockString::format(time));
    }
}
