//! Digit reduction primitives used by every other calculation.

use serde::{Deserialize, Serialize};

use crate::constants::{KARMIC_DEBT_NUMBERS, MASTER_NUMBERS};
use crate::letters::LetterBreakdown;

/// Reduce a number to a single digit (1-9), optionally stopping at the
/// master numbers 11, 22, and 33.
pub fn reduce(number: u32, preserve_master_numbers: bool) -> u32 {
    let mut current = number;

    while current > 9 {
        if preserve_master_numbers && is_master_number(current) {
            return current;
        }
        current = sum_digits(current);
    }

    current
}

/// Reduce all the way to a single digit, forcing master numbers through.
pub fn reduce_to_single_digit(number: u32) -> u32 {
    reduce(number, false)
}

/// Sum of the decimal digits of a number.
pub fn sum_digits(number: u32) -> u32 {
    let mut sum = 0;
    let mut n = number;

    while n > 0 {
        sum += n % 10;
        n /= 10;
    }

    sum
}

/// Every value visited during reduction, starting with the input itself.
///
/// When preserving, the trace stops at a master number without summing it.
pub fn reduction_steps(number: u32, preserve_master_numbers: bool) -> Vec<u32> {
    let mut steps = vec![number];
    let mut current = number;

    while current > 9 {
        if preserve_master_numbers && is_master_number(current) {
            break;
        }
        current = sum_digits(current);
        steps.push(current);
    }

    steps
}

pub fn is_master_number(number: u32) -> bool {
    MASTER_NUMBERS.contains(&number)
}

pub fn is_karmic_debt_number(number: u32) -> bool {
    KARMIC_DEBT_NUMBERS.contains(&number)
}

/// The karmic debt number hiding behind a reduced value, if any.
///
/// Debt is detected along the non-preserving step trace because the final
/// digit alone does not reveal its origin (13 reduces to 4, but the 13
/// still counts).
pub fn karmic_debt(original_sum: u32) -> Option<u32> {
    reduction_steps(original_sum, false)
        .into_iter()
        .find(|&step| is_karmic_debt_number(step))
}

/// Outcome of reducing a summed quantity, with enough detail to show the
/// working: the pre-reduction total, each intermediate sum, the per-letter
/// contributions when the sum came from a name, and the master/karmic flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberResult {
    pub final_number: u32,
    pub original_sum: u32,
    pub reduction_steps: Vec<u32>,
    pub breakdown: Vec<LetterBreakdown>,
    pub karmic_debt: Option<u32>,
    pub is_master: bool,
}
