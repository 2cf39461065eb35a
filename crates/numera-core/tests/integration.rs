//! Integration tests exercising the full engine through the public API:
//! analysis → cycles → compatibility → auspicious dates.

use std::collections::BTreeSet;

use numera_core::{
    CompatibilityLevel, Date, LetterSystem, auspicious_dates, compatibility, compute_analysis,
    current_challenge, current_life_period, current_pinnacle, level_description, number_title,
    personal_day, personal_month, personal_year, relationship_number, universal_day,
    universal_month, universal_year,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::new(y, m, d).unwrap()
}

/// Test 1: the full analysis for one person, every number cross-checked
/// against hand-worked values.
#[test]
fn full_analysis_known_profile() {
    let birth = date(1990, 5, 15);
    let analysis = compute_analysis("John Smith", "John", birth, LetterSystem::Pythagorean);

    // date side: 5 + 6 + 1 = 12 -> 3, with debt 19 behind the year
    assert_eq!(analysis.life_path.final_number, 3);
    assert_eq!(analysis.life_path.karmic_debt, Some(19));
    assert_eq!(analysis.birthday.final_number, 6);

    // name side
    assert_eq!(analysis.expression.final_number, 8);
    assert_eq!(analysis.soul_urge.final_number, 6);
    assert_eq!(analysis.personality.final_number, 11);
    assert!(analysis.personality.is_master);
    assert_eq!(analysis.maturity.final_number, 11);
    assert_eq!(analysis.balance.final_number, 2);
    assert_eq!(analysis.karmic_lessons, BTreeSet::from([3, 7]));
    assert_eq!(analysis.hidden_passion, Some(8));
    assert_eq!(analysis.subconscious_self, 7);

    // timelines: pinnacles 11/7/9/6, challenges 1/5/4/4, periods 5/6/1
    let pinnacle_numbers: Vec<u32> = analysis.pinnacles.iter().map(|p| p.number).collect();
    assert_eq!(pinnacle_numbers, vec![11, 7, 9, 6]);
    assert!(analysis.pinnacles[0].is_master);

    let challenge_numbers: Vec<u32> = analysis.challenges.iter().map(|c| c.number).collect();
    assert_eq!(challenge_numbers, vec![1, 5, 4, 4]);

    let period_numbers: Vec<u32> = analysis.life_periods.iter().map(|p| p.number).collect();
    assert_eq!(period_numbers, vec![5, 6, 1]);

    // life path 3 puts the first pinnacle boundary at age 33
    assert_eq!(analysis.pinnacles[0].end_age, Some(33));
    assert_eq!(analysis.pinnacles[3].end_age, None);
}

/// Test 2: the "current" lookups agree with the timeline boundaries.
#[test]
fn current_lookups_track_age() {
    let birth = date(1990, 5, 15);

    // age 35 on 2025-07-04: inside the second pinnacle (34..=42)
    let today = date(2025, 7, 4);
    let pinnacle = current_pinnacle(birth, today).unwrap();
    assert_eq!(pinnacle.period_index, 2);
    assert_eq!(pinnacle.number, 7);

    let challenge = current_challenge(birth, today).unwrap();
    assert_eq!(challenge.period_index, 2);
    assert_eq!(challenge.number, 5);

    // first life period runs to 28 + 9 - 3 = 34, so age 35 is in the second
    let period = current_life_period(birth, today).unwrap();
    assert_eq!(period.period_index, 2);
    assert_eq!(period.number, 6);

    // before birth there is no active phase
    let before = date(1980, 1, 1);
    assert!(current_pinnacle(birth, before).is_none());
    assert!(current_challenge(birth, before).is_none());
    assert!(current_life_period(birth, before).is_none());
}

/// Test 3: the personal and universal cycle chain for a known date.
#[test]
fn cycle_chain_known_values() {
    let birth = date(1990, 5, 15);

    // 5 + 6 + reduce(2025)=9 -> 20 -> 2
    let py = personal_year(birth, 2025);
    assert_eq!(py, 2);
    let pm = personal_month(py, 7);
    assert_eq!(pm, 9);
    let pd = personal_day(pm, 4);
    assert_eq!(pd, 4);

    assert_eq!(universal_year(2025), 9);
    assert_eq!(universal_month(2025, 7), 7);
    // 7 + 4 + 2025 = 2036 -> 11 -> 2
    assert_eq!(universal_day(date(2025, 7, 4)), 2);
}

/// Test 4: end-to-end compatibility with hand-worked aspect scores.
#[test]
fn compatibility_known_pair() {
    let result = compatibility(
        "John Smith",
        date(1990, 5, 15),
        "Jane Doe",
        date(1992, 3, 8),
        LetterSystem::Pythagorean,
    );

    // Jane Doe: life path 5, expression 9, soul urge 8, personality 1, birthday 8
    assert_eq!(result.person2.life_path, 5);
    assert_eq!(result.person2.expression, 9);
    assert_eq!(result.person2.soul_urge, 8);
    assert_eq!(result.person2.personality, 1);
    assert_eq!(result.person2.birthday, 8);

    assert_eq!(result.life_path.score, 90);
    assert_eq!(result.expression.score, 70);
    assert_eq!(result.soul_urge.score, 70);
    // 11 vs 1 reduces to base(1,2)=60 plus the single-master 3
    assert_eq!(result.personality.score, 63);
    assert_eq!(result.birthday.score, 70);

    // (90*30 + 70*25 + 70*20 + 63*15 + 70*10) / 100 = 74
    assert_eq!(result.overall_score, 74);
    assert_eq!(result.level, CompatibilityLevel::Good);

    assert_eq!(result.shared_numbers, vec![8]);
    assert!(result.complementary_aspects.is_empty());
    assert!(result.challenges.is_empty());
}

/// Test 5: relationship number feeds the auspicious scan, and the scan's
/// output contract holds for real birth dates.
#[test]
fn auspicious_scan_end_to_end() {
    let b1 = date(1990, 5, 15);
    let b2 = date(1992, 3, 8);

    // life paths 3 and 5
    assert_eq!(relationship_number(b1, b2), 8);

    let dates = auspicious_dates(b1, b2, 2025);
    assert!(!dates.is_empty(), "a full year should yield some dates");
    assert!(dates.len() <= 30);
    assert!(dates.iter().all(|d| d.score >= 80 && d.score <= 100));
    assert!(dates.iter().all(|d| d.date.year() == 2025));
    assert!(dates.windows(2).all(|w| w[0].score >= w[1].score));
}

/// Test 6: narrative lookups cover what the engine can produce.
#[test]
fn interpretation_lookups() {
    let analysis = compute_analysis(
        "John Smith",
        "John",
        date(1990, 5, 15),
        LetterSystem::Pythagorean,
    );
    assert_eq!(number_title(analysis.life_path.final_number), "The Communicator");
    assert_eq!(number_title(analysis.personality.final_number), "The Intuitive Visionary");

    let result = compatibility(
        "John Smith",
        date(1990, 5, 15),
        "Jane Doe",
        date(1992, 3, 8),
        LetterSystem::Pythagorean,
    );
    assert!(!level_description(result.level).is_empty());
}

/// Test 7: Chaldean and Devanagari inputs flow through the whole pipeline.
#[test]
fn alternate_systems_end_to_end() {
    let chaldean = compute_analysis(
        "John Smith",
        "John",
        date(1990, 5, 15),
        LetterSystem::Chaldean,
    );
    // JOHN SMITH under Chaldean sums to 35 -> 8
    assert_eq!(chaldean.expression.original_sum, 35);
    assert_eq!(chaldean.expression.final_number, 8);

    let devanagari = compute_analysis("राम", "राम", date(1990, 5, 15), LetterSystem::Pythagorean);
    assert_eq!(devanagari.expression.original_sum, 18);
    assert_eq!(devanagari.expression.final_number, 9);
    // no Latin letters, so every value 1-9 is a karmic lesson
    assert_eq!(devanagari.karmic_lessons.len(), 9);
    assert_eq!(devanagari.subconscious_self, 0);
}
