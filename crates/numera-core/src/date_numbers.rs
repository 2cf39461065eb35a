//! Numbers derived from a birth date: Life Path, Birthday, the personal and
//! universal cycles, and the age-bounded Pinnacle / Challenge / Life Period
//! timelines.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CHALLENGE_CYCLE_LENGTH, FIRST_PERIOD_END_AGE_BASE, FIRST_PINNACLE_BASE_AGE, PERIOD_LENGTH,
    PINNACLE_CYCLE_LENGTH,
};
use crate::date::Date;
use crate::reduce::{
    NumberResult, is_karmic_debt_number, is_master_number, karmic_debt, reduce,
    reduce_to_single_digit, reduction_steps,
};

/// Life Path calculation: the three date components are reduced
/// independently (preserving masters), then the component sum is reduced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifePathResult {
    pub final_number: u32,
    pub month_component: u32,
    pub day_component: u32,
    pub year_component: u32,
    pub total_before_reduction: u32,
    pub reduction_steps: Vec<u32>,
    pub karmic_debt: Option<u32>,
    pub is_master: bool,
}

/// One of the four pinnacle phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnaclePeriod {
    pub number: u32,
    pub start_age: u32,
    /// None means the phase runs for the rest of life.
    pub end_age: Option<u32>,
    pub period_index: u32,
    pub is_master: bool,
}

/// One of the four challenge phases (same timing as the pinnacles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengePeriod {
    pub number: u32,
    pub start_age: u32,
    pub end_age: Option<u32>,
    pub period_index: u32,
}

/// Which date component a life period derives from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSource {
    Month,
    Day,
    Year,
}

impl PeriodSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodSource::Month => "Month",
            PeriodSource::Day => "Day",
            PeriodSource::Year => "Year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Month" => Some(PeriodSource::Month),
            "Day" => Some(PeriodSource::Day),
            "Year" => Some(PeriodSource::Year),
            _ => None,
        }
    }
}

/// One of the three life period cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifePeriod {
    pub number: u32,
    pub start_age: u32,
    pub end_age: Option<u32>,
    pub period_index: u32,
    pub source: PeriodSource,
    pub is_master: bool,
}

fn year_digits(date: Date) -> u32 {
    date.year().unsigned_abs()
}

/// The Life Path number, derived from the full birth date.
///
/// Karmic debt here is intentionally special-cased: it is flagged if the raw
/// day of month is itself a debt number, or if the year's non-preserving
/// reduction trace passes through one. This diverges from the trace-of-sum
/// check used for name numbers and is kept as-is.
pub fn life_path(birth_date: Date) -> LifePathResult {
    let month_component = reduce(birth_date.month(), true);
    let day_component = reduce(birth_date.day(), true);
    let year_component = reduce(year_digits(birth_date), true);

    let sum = month_component + day_component + year_component;
    let final_number = reduce(sum, true);

    LifePathResult {
        final_number,
        month_component,
        day_component,
        year_component,
        total_before_reduction: sum,
        reduction_steps: reduction_steps(sum, true),
        karmic_debt: date_karmic_debt(birth_date),
        is_master: is_master_number(final_number),
    }
}

fn date_karmic_debt(birth_date: Date) -> Option<u32> {
    let day = birth_date.day();
    if is_karmic_debt_number(day) {
        return Some(day);
    }
    reduction_steps(year_digits(birth_date), false)
        .into_iter()
        .find(|&step| is_karmic_debt_number(step))
}

/// The Birthday number: the day of month reduced. The master flag is set if
/// either the reduced value or the raw day is a master number.
pub fn birthday_number(birth_date: Date) -> NumberResult {
    let day = birth_date.day();
    let reduced = reduce(day, true);

    NumberResult {
        final_number: reduced,
        original_sum: day,
        reduction_steps: reduction_steps(day, true),
        breakdown: Vec::new(),
        karmic_debt: if is_karmic_debt_number(day) {
            Some(day)
        } else {
            None
        },
        is_master: is_master_number(reduced) || is_master_number(day),
    }
}

/// Personal Year for a calendar year. No master preservation anywhere on
/// this path.
pub fn personal_year(birth_date: Date, year: i32) -> u32 {
    let month = reduce_to_single_digit(birth_date.month());
    let day = reduce_to_single_digit(birth_date.day());
    let year = reduce_to_single_digit(year.unsigned_abs());
    reduce_to_single_digit(month + day + year)
}

pub fn personal_month(personal_year: u32, month: u32) -> u32 {
    reduce_to_single_digit(personal_year + reduce_to_single_digit(month))
}

pub fn personal_day(personal_month: u32, day: u32) -> u32 {
    reduce_to_single_digit(personal_month + reduce_to_single_digit(day))
}

pub fn universal_year(year: i32) -> u32 {
    reduce_to_single_digit(year.unsigned_abs())
}

pub fn universal_month(year: i32, month: u32) -> u32 {
    reduce_to_single_digit(universal_year(year) + reduce_to_single_digit(month))
}

/// Universal Day: month + day + year summed in one pass, then reduced.
pub fn universal_day(date: Date) -> u32 {
    reduce_to_single_digit(date.month() + date.day() + date.year().unsigned_abs())
}

/// The four pinnacle phases. Ages derive from the Life Path number: the
/// first phase ends at 36 minus Life Path, the next two run 9 years each.
pub fn pinnacles(birth_date: Date) -> Vec<PinnaclePeriod> {
    let life_path = life_path(birth_date).final_number;

    let month = reduce_to_single_digit(birth_date.month());
    let day = reduce_to_single_digit(birth_date.day());
    let year = reduce_to_single_digit(year_digits(birth_date));

    let first = reduce(month + day, true);
    let second = reduce(day + year, true);
    let third = reduce(first + second, true);
    let fourth = reduce(month + year, true);

    let first_end = FIRST_PINNACLE_BASE_AGE - life_path;
    let second_end = first_end + PINNACLE_CYCLE_LENGTH;
    let third_end = second_end + PINNACLE_CYCLE_LENGTH;

    let period = |number, start_age, end_age, period_index| PinnaclePeriod {
        number,
        start_age,
        end_age,
        period_index,
        is_master: is_master_number(number),
    };

    vec![
        period(first, 0, Some(first_end), 1),
        period(second, first_end + 1, Some(second_end), 2),
        period(third, second_end + 1, Some(third_end), 3),
        period(fourth, third_end + 1, None, 4),
    ]
}

/// The four challenge phases: absolute differences of the reduced date
/// components. Differences of single digits never exceed 9, so no further
/// reduction is applied.
pub fn challenges(birth_date: Date) -> Vec<ChallengePeriod> {
    let life_path = life_path(birth_date).final_number;

    let month = reduce_to_single_digit(birth_date.month());
    let day = reduce_to_single_digit(birth_date.day());
    let year = reduce_to_single_digit(year_digits(birth_date));

    let first = month.abs_diff(day);
    let second = day.abs_diff(year);
    let third = first.abs_diff(second);
    let fourth = month.abs_diff(year);

    let first_end = FIRST_PINNACLE_BASE_AGE - life_path;
    let second_end = first_end + CHALLENGE_CYCLE_LENGTH;
    let third_end = second_end + CHALLENGE_CYCLE_LENGTH;

    let period = |number, start_age, end_age, period_index| ChallengePeriod {
        number,
        start_age,
        end_age,
        period_index,
    };

    vec![
        period(first, 0, Some(first_end), 1),
        period(second, first_end + 1, Some(second_end), 2),
        period(third, second_end + 1, Some(third_end), 3),
        period(fourth, third_end + 1, None, 4),
    ]
}

/// The three life period cycles: raw month, day, and year each reduced with
/// master preservation.
pub fn life_periods(birth_date: Date) -> Vec<LifePeriod> {
    let life_path = life_path(birth_date).final_number;

    let first = reduce(birth_date.month(), true);
    let second = reduce(birth_date.day(), true);
    let third = reduce(year_digits(birth_date), true);

    // 9 - life_path goes negative for master life paths; the original
    // arithmetic is signed, so a Life Path 11 ends its first period at 26.
    let first_end = (FIRST_PERIOD_END_AGE_BASE as i32 + 9 - life_path as i32) as u32;
    let second_end = first_end + PERIOD_LENGTH;

    let period = |number, start_age, end_age, period_index, source| LifePeriod {
        number,
        start_age,
        end_age,
        period_index,
        source,
        is_master: is_master_number(number),
    };

    vec![
        period(first, 0, Some(first_end), 1, PeriodSource::Month),
        period(second, first_end + 1, Some(second_end), 2, PeriodSource::Day),
        period(third, second_end + 1, None, 3, PeriodSource::Year),
    ]
}

/// Whole years of age on a given day. Negative before the birth date.
pub fn current_age(birth_date: Date, today: Date) -> i32 {
    birth_date.years_until(today)
}

fn age_in_span(age: i32, start_age: u32, end_age: Option<u32>) -> bool {
    age >= start_age as i32 && end_age.is_none_or(|end| age <= end as i32)
}

/// The pinnacle phase active on `today`. None only when `today` precedes
/// the birth date.
pub fn current_pinnacle(birth_date: Date, today: Date) -> Option<PinnaclePeriod> {
    let age = current_age(birth_date, today);
    pinnacles(birth_date)
        .into_iter()
        .find(|p| age_in_span(age, p.start_age, p.end_age))
}

/// The challenge phase active on `today`.
pub fn current_challenge(birth_date: Date, today: Date) -> Option<ChallengePeriod> {
    let age = current_age(birth_date, today);
    challenges(birth_date)
        .into_iter()
        .find(|c| age_in_span(age, c.start_age, c.end_age))
}

/// The life period active on `today`.
pub fn current_life_period(birth_date: Date, today: Date) -> Option<LifePeriod> {
    let age = current_age(birth_date, today);
    life_periods(birth_date)
        .into_iter()
        .find(|p| age_in_span(age, p.start_age, p.end_age))
}
