//! Numbers derived from a name: Expression, Soul Urge, Personality,
//! Balance, Maturity, Karmic Lessons, Hidden Passion, Subconscious Self,
//! and the first-name initials.
//!
//! All functions skip characters absent from every letter table, so
//! punctuation and unsupported symbols never affect a sum. An empty or
//! fully-unsupported name degrades to sum 0 / final 0 rather than erroring.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::letters::{
    LetterBreakdown, LetterSystem, is_consonant, is_vowel, is_western_vowel, value_of,
    western_value,
};
use crate::reduce::{
    NumberResult, is_master_number, karmic_debt, reduce, reduce_to_single_digit, reduction_steps,
};

/// Cornerstone, Capstone, and First Vowel values of the first name.
/// Any field may be absent: an empty first name yields none, a vowelless
/// first name yields no first vowel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInitials {
    pub cornerstone: Option<u32>,
    pub capstone: Option<u32>,
    pub first_vowel: Option<u32>,
}

fn summed_result(sum: u32, breakdown: Vec<LetterBreakdown>) -> NumberResult {
    let final_number = reduce(sum, true);
    NumberResult {
        final_number,
        original_sum: sum,
        reduction_steps: reduction_steps(sum, true),
        breakdown,
        karmic_debt: karmic_debt(sum),
        is_master: is_master_number(final_number),
    }
}

fn sum_letters(full_name: &str, system: LetterSystem, keep: impl Fn(char) -> bool) -> NumberResult {
    let mut sum = 0;
    let mut breakdown = Vec::new();

    for ch in full_name.chars() {
        if !keep(ch) {
            continue;
        }
        let Some(value) = value_of(ch, system) else {
            continue;
        };
        sum += value;
        breakdown.push(LetterBreakdown {
            letter: ch.to_ascii_uppercase(),
            value,
        });
    }

    summed_result(sum, breakdown)
}

/// Expression (Destiny) number: every letter of the full name.
pub fn expression(full_name: &str, system: LetterSystem) -> NumberResult {
    sum_letters(full_name, system, |_| true)
}

/// Soul Urge (Heart's Desire) number: the vowels of the full name.
pub fn soul_urge(full_name: &str, system: LetterSystem) -> NumberResult {
    sum_letters(full_name, system, is_vowel)
}

/// Personality number: the consonants of the full name.
pub fn personality(full_name: &str, system: LetterSystem) -> NumberResult {
    sum_letters(full_name, system, is_consonant)
}

/// Maturity number: Life Path plus Expression final numbers, reduced with
/// master preservation.
pub fn maturity(life_path_number: u32, expression_number: u32) -> NumberResult {
    summed_result(life_path_number + expression_number, Vec::new())
}

/// Balance number: the initials of each whitespace-separated name part,
/// reduced all the way to a single digit. Western letters only; no master
/// preservation and no karmic debt on this path.
pub fn balance(full_name: &str, system: LetterSystem) -> NumberResult {
    let mut sum = 0;
    let mut breakdown = Vec::new();

    for part in full_name.split_whitespace() {
        let Some(initial) = part.chars().next() else {
            continue;
        };
        let Some(value) = western_value(system, initial) else {
            continue;
        };
        sum += value;
        breakdown.push(LetterBreakdown {
            letter: initial.to_ascii_uppercase(),
            value,
        });
    }

    NumberResult {
        final_number: reduce_to_single_digit(sum),
        original_sum: sum,
        reduction_steps: reduction_steps(sum, false),
        breakdown,
        karmic_debt: None,
        is_master: false,
    }
}

fn western_value_counts(full_name: &str, system: LetterSystem) -> BTreeMap<u32, u32> {
    let mut counts = BTreeMap::new();
    for ch in full_name.chars() {
        if let Some(value) = western_value(system, ch) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}

/// Karmic Lessons: the values 1-9 that never occur in the name.
pub fn karmic_lessons(full_name: &str, system: LetterSystem) -> BTreeSet<u32> {
    let present: BTreeSet<u32> = western_value_counts(full_name, system).into_keys().collect();
    (1..=9).filter(|v| !present.contains(v)).collect()
}

/// Hidden Passion: the letter value occurring most often, provided it
/// occurs at least twice. Ties go to the larger value.
pub fn hidden_passion(full_name: &str, system: LetterSystem) -> Option<u32> {
    let counts = western_value_counts(full_name, system);
    let max = counts.values().copied().max()?;
    if max < 2 {
        return None;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count == max)
        .map(|(value, _)| value)
        .max()
}

/// Subconscious Self: 9 minus the number of karmic lessons.
pub fn subconscious_self(full_name: &str, system: LetterSystem) -> u32 {
    9 - karmic_lessons(full_name, system).len() as u32
}

/// Cornerstone, Capstone, and First Vowel of the first name. Western
/// letters only, matching the classic definition.
pub fn name_initials(first_name: &str, system: LetterSystem) -> NameInitials {
    let letters: Vec<char> = first_name.chars().filter(|c| c.is_alphabetic()).collect();
    let (Some(&first), Some(&last)) = (letters.first(), letters.last()) else {
        return NameInitials::default();
    };

    NameInitials {
        cornerstone: western_value(system, first),
        capstone: western_value(system, last),
        first_vowel: letters
            .iter()
            .find(|&&c| is_western_vowel(c))
            .and_then(|&c| western_value(system, c)),
    }
}
