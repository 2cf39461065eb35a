//! Compact narrative lookups: the traditional title of each final number
//! and a one-line reading of a compatibility level.

use crate::compatibility::CompatibilityLevel;

/// Traditional title of a final number. Unknown numbers (0 from an empty
/// name, or an unreduced sum) fall back to "Unknown".
pub fn number_title(number: u32) -> &'static str {
    match number {
        1 => "The Leader",
        2 => "The Diplomat",
        3 => "The Communicator",
        4 => "The Builder",
        5 => "The Freedom Seeker",
        6 => "The Nurturer",
        7 => "The Seeker",
        8 => "The Powerhouse",
        9 => "The Humanitarian",
        11 => "The Intuitive Visionary",
        22 => "The Master Builder",
        33 => "The Master Teacher",
        _ => "Unknown",
    }
}

/// One-line reading of a compatibility level.
pub fn level_description(level: CompatibilityLevel) -> &'static str {
    match level {
        CompatibilityLevel::Excellent => {
            "A naturally harmonious pairing with strong mutual understanding"
        }
        CompatibilityLevel::Good => {
            "A supportive pairing that thrives with ordinary give and take"
        }
        CompatibilityLevel::Moderate => {
            "A workable pairing that asks for conscious effort on both sides"
        }
        CompatibilityLevel::Challenging => {
            "A demanding pairing where core differences need active bridging"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_cover_every_final_number() {
        for n in (1..=9).chain([11, 22, 33]) {
            assert_ne!(number_title(n), "Unknown", "missing title for {n}");
        }
        assert_eq!(number_title(0), "Unknown");
        assert_eq!(number_title(13), "Unknown");
    }

    #[test]
    fn test_known_titles() {
        assert_eq!(number_title(1), "The Leader");
        assert_eq!(number_title(11), "The Intuitive Visionary");
        assert_eq!(number_title(33), "The Master Teacher");
    }

    #[test]
    fn test_level_descriptions_distinct() {
        let all = [
            CompatibilityLevel::Excellent,
            CompatibilityLevel::Good,
            CompatibilityLevel::Moderate,
            CompatibilityLevel::Challenging,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(level_description(*a), level_description(*b));
            }
        }
    }
}
