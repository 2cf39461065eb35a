//! Two-person compatibility: per-aspect scoring from a symmetric base
//! matrix with master-number bonuses, a weighted overall score, qualitative
//! rules, the relationship number, and the auspicious-date scan.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUSPICIOUS_DATE_LIMIT, AUSPICIOUS_SCORE_FLOOR, EXCELLENT_THRESHOLD, GOOD_THRESHOLD,
    MODERATE_THRESHOLD,
};
use crate::date::{Date, days_in_month};
use crate::date_numbers::{birthday_number, life_path, personal_year, universal_day};
use crate::letters::LetterSystem;
use crate::name_numbers::{expression, personality, soul_urge};
use crate::reduce::{reduce, reduce_to_single_digit};

/// The five comparison numbers for one person, with master flags for the
/// four that can carry one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreNumbers {
    pub life_path: u32,
    pub life_path_master: bool,
    pub expression: u32,
    pub expression_master: bool,
    pub soul_urge: u32,
    pub soul_urge_master: bool,
    pub personality: u32,
    pub personality_master: bool,
    pub birthday: u32,
}

/// Score for one compared aspect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectCompatibility {
    pub aspect: String,
    pub score: u32,
    pub number1: u32,
    pub number2: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityLevel {
    Excellent,
    Good,
    Moderate,
    Challenging,
}

impl CompatibilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            CompatibilityLevel::Excellent => "Excellent",
            CompatibilityLevel::Good => "Good",
            CompatibilityLevel::Moderate => "Moderate",
            CompatibilityLevel::Challenging => "Challenging",
        }
    }

    fn from_score(score: u32) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            CompatibilityLevel::Excellent
        } else if score >= GOOD_THRESHOLD {
            CompatibilityLevel::Good
        } else if score >= MODERATE_THRESHOLD {
            CompatibilityLevel::Moderate
        } else {
            CompatibilityLevel::Challenging
        }
    }
}

/// Full two-person compatibility analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub overall_score: u32,
    pub level: CompatibilityLevel,
    pub life_path: AspectCompatibility,
    pub expression: AspectCompatibility,
    pub soul_urge: AspectCompatibility,
    pub personality: AspectCompatibility,
    pub birthday: AspectCompatibility,
    pub shared_numbers: Vec<u32>,
    pub complementary_aspects: Vec<String>,
    pub challenges: Vec<String>,
    pub person1: CoreNumbers,
    pub person2: CoreNumbers,
}

/// A calendar date with its 0-100 auspiciousness score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuspiciousDate {
    pub date: Date,
    pub score: u32,
}

/// Base compatibility of two single-digit numbers. Symmetric; unlisted
/// pairs default to 50.
fn base_compatibility(a: u32, b: u32) -> u32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (1, 1) => 75,
        (1, 2) => 60,
        (1, 3) => 90,
        (1, 4) => 55,
        (1, 5) => 85,
        (1, 6) => 70,
        (1, 7) => 65,
        (1, 8) => 80,
        (1, 9) => 85,
        (2, 2) => 70,
        (2, 3) => 75,
        (2, 4) => 85,
        (2, 5) => 55,
        (2, 6) => 90,
        (2, 7) => 80,
        (2, 8) => 75,
        (2, 9) => 85,
        (3, 3) => 80,
        (3, 4) => 50,
        (3, 5) => 90,
        (3, 6) => 95,
        (3, 7) => 60,
        (3, 8) => 65,
        (3, 9) => 90,
        (4, 4) => 75,
        (4, 5) => 45,
        (4, 6) => 80,
        (4, 7) => 85,
        (4, 8) => 90,
        (4, 9) => 55,
        (5, 5) => 85,
        (5, 6) => 50,
        (5, 7) => 75,
        (5, 8) => 60,
        (5, 9) => 80,
        (6, 6) => 85,
        (6, 7) => 55,
        (6, 8) => 70,
        (6, 9) => 95,
        (7, 7) => 80,
        (7, 8) => 50,
        (7, 9) => 65,
        (8, 8) => 75,
        (8, 9) => 70,
        (9, 9) => 80,
        _ => 50,
    }
}

/// Bonus when both numbers are masters. Unlisted master pairs default to 5.
fn master_pair_bonus(a: u32, b: u32) -> u32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (11, 11) | (22, 22) | (33, 33) => 10,
        (11, 22) | (11, 33) | (22, 33) => 8,
        _ => 5,
    }
}

/// Score one aspect: reduce both numbers to single digits for the matrix
/// lookup, then add the master bonus on the original values, capped at 100.
fn aspect_score(number1: u32, number2: u32, is_master1: bool, is_master2: bool) -> u32 {
    let reduced1 = if number1 > 9 {
        reduce_to_single_digit(number1)
    } else {
        number1
    };
    let reduced2 = if number2 > 9 {
        reduce_to_single_digit(number2)
    } else {
        number2
    };

    let base = base_compatibility(reduced1, reduced2);

    let bonus = if is_master1 && is_master2 {
        master_pair_bonus(number1, number2)
    } else if is_master1 || is_master2 {
        3
    } else {
        0
    };

    (base + bonus).min(100)
}

/// Weighted integer average, truncating toward zero.
fn weighted_score(aspects: &[(u32, u32)]) -> u32 {
    let total_weight: u32 = aspects.iter().map(|&(_, w)| w).sum();
    let weighted_sum: u32 = aspects.iter().map(|&(s, w)| s * w).sum();
    weighted_sum / total_weight
}

/// The five core numbers for one person.
pub fn core_numbers(name: &str, birth_date: Date, system: LetterSystem) -> CoreNumbers {
    let life_path = life_path(birth_date);
    let expression = expression(name, system);
    let soul_urge = soul_urge(name, system);
    let personality = personality(name, system);
    let birthday = birthday_number(birth_date);

    CoreNumbers {
        life_path: life_path.final_number,
        life_path_master: life_path.is_master,
        expression: expression.final_number,
        expression_master: expression.is_master,
        soul_urge: soul_urge.final_number,
        soul_urge_master: soul_urge.is_master,
        personality: personality.final_number,
        personality_master: personality.is_master,
        birthday: birthday.final_number,
    }
}

fn shared_numbers(p1: &CoreNumbers, p2: &CoreNumbers) -> Vec<u32> {
    let set1 = [p1.life_path, p1.expression, p1.soul_urge, p1.personality, p1.birthday];
    let set2 = [p2.life_path, p2.expression, p2.soul_urge, p2.personality, p2.birthday];

    let mut shared: Vec<u32> = set1
        .iter()
        .copied()
        .filter(|n| set2.contains(n))
        .collect();
    shared.sort_unstable();
    shared.dedup();
    shared
}

fn unordered_eq(a: (u32, u32), b: (u32, u32)) -> bool {
    a == b || (a.1, a.0) == b
}

fn complementary_aspects(p1: &CoreNumbers, p2: &CoreNumbers) -> Vec<String> {
    let mut aspects = Vec::new();

    if reduce_to_single_digit(p1.life_path + p2.life_path) == 9 {
        aspects.push("Life Paths combine to 9 - Universal completion".to_string());
    }
    if unordered_eq((p1.life_path, p2.life_path), (1, 2)) {
        aspects.push("Natural leader-supporter dynamic".to_string());
    }
    if unordered_eq((p1.expression, p2.expression), (3, 6)) {
        aspects.push("Creative expression meets nurturing support".to_string());
    }
    if p1.soul_urge == p2.soul_urge {
        aspects.push("Shared inner desires and motivations".to_string());
    }
    if p1.life_path_master && p2.life_path_master {
        aspects.push("Both carry master number energy".to_string());
    }

    aspects
}

fn challenge_aspects(p1: &CoreNumbers, p2: &CoreNumbers) -> Vec<String> {
    let mut challenges = Vec::new();

    let lp_pair = (p1.life_path, p2.life_path);
    if unordered_eq(lp_pair, (4, 5)) || unordered_eq(lp_pair, (7, 8)) {
        challenges.push("Different approaches to life structure and freedom".to_string());
    }
    if p1.personality == 1 && p2.personality == 1 {
        challenges.push("Both desire to lead - may compete for control".to_string());
    }
    if unordered_eq((p1.expression, p2.expression), (3, 7)) {
        challenges.push("Different communication styles - social vs introspective".to_string());
    }
    if unordered_eq((p1.soul_urge, p2.soul_urge), (1, 2)) {
        challenges.push("Different core needs - independence vs partnership".to_string());
    }

    challenges
}

/// Full compatibility analysis between two people.
pub fn compatibility(
    name1: &str,
    birth_date1: Date,
    name2: &str,
    birth_date2: Date,
    system: LetterSystem,
) -> CompatibilityResult {
    let p1 = core_numbers(name1, birth_date1, system);
    let p2 = core_numbers(name2, birth_date2, system);

    let life_path_score =
        aspect_score(p1.life_path, p2.life_path, p1.life_path_master, p2.life_path_master);
    let expression_score = aspect_score(
        p1.expression,
        p2.expression,
        p1.expression_master,
        p2.expression_master,
    );
    let soul_urge_score =
        aspect_score(p1.soul_urge, p2.soul_urge, p1.soul_urge_master, p2.soul_urge_master);
    let personality_score = aspect_score(
        p1.personality,
        p2.personality,
        p1.personality_master,
        p2.personality_master,
    );
    // the birthday aspect never receives a master bonus
    let birthday_score = aspect_score(p1.birthday, p2.birthday, false, false);

    let overall_score = weighted_score(&[
        (life_path_score, 30),
        (expression_score, 25),
        (soul_urge_score, 20),
        (personality_score, 15),
        (birthday_score, 10),
    ]);

    let aspect = |name: &str, score, n1, n2| AspectCompatibility {
        aspect: name.to_string(),
        score,
        number1: n1,
        number2: n2,
    };

    CompatibilityResult {
        overall_score,
        level: CompatibilityLevel::from_score(overall_score),
        life_path: aspect("Life Path", life_path_score, p1.life_path, p2.life_path),
        expression: aspect("Expression", expression_score, p1.expression, p2.expression),
        soul_urge: aspect("Soul Urge", soul_urge_score, p1.soul_urge, p2.soul_urge),
        personality: aspect("Personality", personality_score, p1.personality, p2.personality),
        birthday: aspect("Birthday", birthday_score, p1.birthday, p2.birthday),
        shared_numbers: shared_numbers(&p1, &p2),
        complementary_aspects: complementary_aspects(&p1, &p2),
        challenges: challenge_aspects(&p1, &p2),
        person1: p1,
        person2: p2,
    }
}

/// Relationship number: the two Life Path numbers summed and reduced with
/// master preservation.
pub fn relationship_number(birth_date1: Date, birth_date2: Date) -> u32 {
    let lp1 = life_path(birth_date1).final_number;
    let lp2 = life_path(birth_date2).final_number;
    reduce(lp1 + lp2, true)
}

fn date_score(
    universal_day: u32,
    relationship_number: u32,
    personal_year1: u32,
    personal_year2: u32,
    day_of_month: u32,
) -> u32 {
    let mut score = 50;

    if universal_day == relationship_number {
        score += 20;
    }
    if reduce_to_single_digit(day_of_month) == relationship_number {
        score += 15;
    }
    if universal_day == personal_year1 || universal_day == personal_year2 {
        score += 10;
    }
    // 6 and 9 are the relationship numbers in the tradition
    if universal_day == 6 || universal_day == 9 {
        score += 10;
    }
    if day_of_month == 11 || day_of_month == 22 {
        score += 5;
    }

    score.min(100)
}

/// Scan every day of `year` and keep the best-scoring dates. At most 30
/// entries, all scoring 80 or better, sorted by score descending with
/// chronological tie order.
pub fn auspicious_dates(birth_date1: Date, birth_date2: Date, year: i32) -> Vec<AuspiciousDate> {
    let relationship = relationship_number(birth_date1, birth_date2);
    let personal_year1 = personal_year(birth_date1, year);
    let personal_year2 = personal_year(birth_date2, year);

    let mut dates = Vec::new();
    for month in 1..=12 {
        for day in 1..=days_in_month(year, month) {
            let Some(date) = Date::new(year, month, day) else {
                continue;
            };
            let score = date_score(
                universal_day(date),
                relationship,
                personal_year1,
                personal_year2,
                day,
            );
            if score >= AUSPICIOUS_SCORE_FLOOR {
                dates.push(AuspiciousDate { date, score });
            }
        }
    }

    // stable sort keeps ties in scan (chronological) order
    dates.sort_by(|a, b| b.score.cmp(&a.score));
    dates.truncate(AUSPICIOUS_DATE_LIMIT);
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn test_base_matrix_symmetric() {
        for a in 1..=9 {
            for b in 1..=9 {
                assert_eq!(base_compatibility(a, b), base_compatibility(b, a));
            }
        }
    }

    #[test]
    fn test_base_matrix_known_pairs() {
        assert_eq!(base_compatibility(3, 6), 95);
        assert_eq!(base_compatibility(6, 3), 95);
        assert_eq!(base_compatibility(4, 5), 45);
        assert_eq!(base_compatibility(2, 2), 70);
    }

    #[test]
    fn test_aspect_score_no_masters() {
        assert_eq!(aspect_score(3, 6, false, false), 95);
    }

    #[test]
    fn test_aspect_score_both_masters() {
        // 11 vs 11: base(2,2) = 70 plus pair bonus 10
        assert_eq!(aspect_score(11, 11, true, true), 80);
        // 11 vs 22: base(2,4) = 85 plus pair bonus 8
        assert_eq!(aspect_score(11, 22, true, true), 93);
    }

    #[test]
    fn test_aspect_score_single_master() {
        // 11 vs 4: base(2,4) = 85 plus flat 3
        assert_eq!(aspect_score(11, 4, true, false), 88);
        assert_eq!(aspect_score(4, 11, false, true), 88);
    }

    #[test]
    fn test_aspect_score_capped() {
        // 33 vs 33: base(6,6) = 85 plus pair bonus 10
        assert_eq!(aspect_score(33, 33, true, true), 95);
        // 33 vs 6 would be base(6,6) = 85 plus flat 3
        assert_eq!(aspect_score(33, 6, true, false), 88);
        // 33 vs 9: base(6,9) = 95 plus flat 3
        assert_eq!(aspect_score(33, 9, true, false), 98);
        assert!(aspect_score(33, 33, true, true) <= 100);
    }

    #[test]
    fn test_weighted_score_truncates() {
        let score = weighted_score(&[(90, 30), (80, 25), (70, 20), (60, 15), (50, 10)]);
        assert_eq!(score, 75);
        assert_eq!(CompatibilityLevel::from_score(score), CompatibilityLevel::Good);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(CompatibilityLevel::from_score(85), CompatibilityLevel::Excellent);
        assert_eq!(CompatibilityLevel::from_score(84), CompatibilityLevel::Good);
        assert_eq!(CompatibilityLevel::from_score(70), CompatibilityLevel::Good);
        assert_eq!(CompatibilityLevel::from_score(50), CompatibilityLevel::Moderate);
        assert_eq!(CompatibilityLevel::from_score(49), CompatibilityLevel::Challenging);
    }

    #[test]
    fn test_compatibility_is_symmetric() {
        let a = compatibility("John Smith", date(1990, 5, 15), "Jane Doe", date(1992, 3, 8),
            LetterSystem::Pythagorean);
        let b = compatibility("Jane Doe", date(1992, 3, 8), "John Smith", date(1990, 5, 15),
            LetterSystem::Pythagorean);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.shared_numbers, b.shared_numbers);
    }

    #[test]
    fn test_compatibility_shared_numbers_sorted() {
        let result = compatibility(
            "John Smith",
            date(1990, 5, 15),
            "John Smith",
            date(1990, 5, 15),
            LetterSystem::Pythagorean,
        );
        // identical people share all their core numbers
        let mut sorted = result.shared_numbers.clone();
        sorted.sort_unstable();
        assert_eq!(result.shared_numbers, sorted);
        assert!(!result.shared_numbers.is_empty());
    }

    #[test]
    fn test_complementary_rules() {
        let mut p1 = CoreNumbers {
            life_path: 1,
            life_path_master: false,
            expression: 3,
            expression_master: false,
            soul_urge: 5,
            soul_urge_master: false,
            personality: 2,
            personality_master: false,
            birthday: 4,
        };
        let mut p2 = p1;
        p2.life_path = 2;
        p2.expression = 6;

        let aspects = complementary_aspects(&p1, &p2);
        assert!(aspects.iter().any(|a| a.contains("leader-supporter")));
        assert!(aspects.iter().any(|a| a.contains("Creative expression")));
        assert!(aspects.iter().any(|a| a.contains("Shared inner desires")));

        // 1 + 2 = 3, not 9
        assert!(!aspects.iter().any(|a| a.contains("Universal completion")));

        p1.life_path = 4;
        p2.life_path = 5;
        let aspects = complementary_aspects(&p1, &p2);
        // 4 + 5 = 9
        assert!(aspects.iter().any(|a| a.contains("Universal completion")));
    }

    #[test]
    fn test_challenge_rules() {
        let p1 = CoreNumbers {
            life_path: 4,
            life_path_master: false,
            expression: 3,
            expression_master: false,
            soul_urge: 1,
            soul_urge_master: false,
            personality: 1,
            personality_master: false,
            birthday: 4,
        };
        let mut p2 = p1;
        p2.life_path = 5;
        p2.expression = 7;
        p2.soul_urge = 2;

        let challenges = challenge_aspects(&p1, &p2);
        assert_eq!(challenges.len(), 4);
    }

    #[test]
    fn test_relationship_number() {
        // life paths 3 and 5 -> 8
        assert_eq!(relationship_number(date(1990, 5, 15), date(1992, 3, 8)), 8);
    }

    #[test]
    fn test_relationship_number_preserves_master() {
        // 1984-06-01 has life path 11; 11 + 11 = 22, a master
        assert_eq!(relationship_number(date(1984, 6, 1), date(1984, 6, 1)), 22);
    }

    #[test]
    fn test_date_score_bonuses() {
        // everything misses: base 50
        assert_eq!(date_score(1, 2, 3, 4, 5), 50);
        // universal day == relationship: +20
        assert_eq!(date_score(2, 2, 3, 4, 5), 70);
        // day of month reduces to relationship: +15
        assert_eq!(date_score(1, 5, 3, 4, 5), 65);
        // universal day matches a personal year: +10
        assert_eq!(date_score(3, 2, 3, 4, 5), 60);
        // universal day 9: +10
        assert_eq!(date_score(9, 2, 3, 4, 5), 60);
        // master day of month: +5
        assert_eq!(date_score(1, 2, 3, 4, 11), 55);
    }

    #[test]
    fn test_date_score_capped_at_100() {
        // relationship 9, universal day 9, day 27 (->9), personal year 9
        assert_eq!(date_score(9, 9, 9, 9, 27), 100);
    }

    #[test]
    fn test_auspicious_scan_properties() {
        let dates = auspicious_dates(date(1990, 5, 15), date(1992, 3, 8), 2025);

        assert!(dates.len() <= 30);
        for entry in &dates {
            assert!(entry.score >= 80, "score {} below floor", entry.score);
            assert_eq!(entry.date.year(), 2025);
        }
        for pair in dates.windows(2) {
            assert!(pair[0].score >= pair[1].score, "not sorted descending");
            if pair[0].score == pair[1].score {
                assert!(pair[0].date < pair[1].date, "ties must stay chronological");
            }
        }
    }

    #[test]
    fn test_auspicious_scan_deterministic() {
        let a = auspicious_dates(date(1990, 5, 15), date(1992, 3, 8), 2024);
        let b = auspicious_dates(date(1990, 5, 15), date(1992, 3, 8), 2024);
        assert_eq!(a, b);
    }
}
