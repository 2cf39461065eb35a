//! Numerology calculation engine.
//!
//! Digit reduction with master-number preservation and karmic-debt
//! detection, Pythagorean/Chaldean letter tables with a Devanagari varga
//! fallback, the full set of date- and name-derived numbers, lifetime
//! timelines (pinnacles, challenges, life periods), two-person
//! compatibility, and the auspicious-date scan.
//!
//! Zero I/O: pure math engine with no opinions about storage or display.
//! The engine never reads a clock; callers supply "today".

pub mod analysis;
pub mod compatibility;
pub mod constants;
pub mod date;
pub mod date_numbers;
pub mod interpret;
pub mod letters;
pub mod name_numbers;
pub mod reduce;

pub use analysis::{Analysis, compute_analysis};
pub use compatibility::{
    AspectCompatibility, AuspiciousDate, CompatibilityLevel, CompatibilityResult, CoreNumbers,
    auspicious_dates, compatibility, core_numbers, relationship_number,
};
pub use constants::{KARMIC_DEBT_NUMBERS, MASTER_NUMBERS};
pub use date::{Date, ParseDateError};
pub use date_numbers::{
    ChallengePeriod, LifePathResult, LifePeriod, PeriodSource, PinnaclePeriod, birthday_number,
    challenges, current_age, current_challenge, current_life_period, current_pinnacle, life_path,
    life_periods, personal_day, personal_month, personal_year, pinnacles, universal_day,
    universal_month, universal_year,
};
pub use interpret::{level_description, number_title};
pub use letters::{LetterBreakdown, LetterSystem};
pub use name_numbers::{
    NameInitials, balance, expression, hidden_passion, karmic_lessons, maturity, name_initials,
    personality, soul_urge, subconscious_self,
};
pub use reduce::{
    NumberResult, is_karmic_debt_number, is_master_number, karmic_debt, reduce,
    reduce_to_single_digit,
};
