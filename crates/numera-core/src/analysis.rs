//! Full single-person analysis: every core and special number plus the
//! three lifetime timelines, assembled in one call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::date_numbers::{
    ChallengePeriod, LifePathResult, LifePeriod, PinnaclePeriod, birthday_number, challenges,
    life_path, life_periods, pinnacles,
};
use crate::letters::LetterSystem;
use crate::name_numbers::{
    NameInitials, balance, expression, hidden_passion, karmic_lessons, maturity, name_initials,
    personality, soul_urge, subconscious_self,
};
use crate::reduce::NumberResult;

/// Everything the engine derives for one person under one letter system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub system: LetterSystem,
    pub birth_date: Date,
    pub life_path: LifePathResult,
    pub birthday: NumberResult,
    pub expression: NumberResult,
    pub soul_urge: NumberResult,
    pub personality: NumberResult,
    pub maturity: NumberResult,
    pub balance: NumberResult,
    pub karmic_lessons: BTreeSet<u32>,
    pub hidden_passion: Option<u32>,
    pub subconscious_self: u32,
    pub initials: NameInitials,
    pub pinnacles: Vec<PinnaclePeriod>,
    pub challenges: Vec<ChallengePeriod>,
    pub life_periods: Vec<LifePeriod>,
}

/// Compute the complete analysis for one person. The first name drives the
/// Cornerstone/Capstone/First Vowel trio; everything else uses the full name.
pub fn compute_analysis(
    full_name: &str,
    first_name: &str,
    birth_date: Date,
    system: LetterSystem,
) -> Analysis {
    let life_path = life_path(birth_date);
    let expression = expression(full_name, system);
    let maturity = maturity(life_path.final_number, expression.final_number);

    Analysis {
        system,
        birth_date,
        birthday: birthday_number(birth_date),
        soul_urge: soul_urge(full_name, system),
        personality: personality(full_name, system),
        maturity,
        balance: balance(full_name, system),
        karmic_lessons: karmic_lessons(full_name, system),
        hidden_passion: hidden_passion(full_name, system),
        subconscious_self: subconscious_self(full_name, system),
        initials: name_initials(first_name, system),
        pinnacles: pinnacles(birth_date),
        challenges: challenges(birth_date),
        life_periods: life_periods(birth_date),
        life_path,
        expression,
    }
}
