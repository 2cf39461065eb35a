use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use numera_core::{
    Analysis, ChallengePeriod, CompatibilityResult, Date, LetterSystem, LifePeriod, PeriodSource,
    PinnaclePeriod,
};

use crate::error::{Result, StoreError};
use crate::schema;

/// A saved person: names, birth date, and the primary flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birth_date: Date,
    pub is_primary: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// All non-blank name parts joined with single spaces.
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.first_name.as_str()];
        if let Some(middle) = self.middle_name.as_deref()
            && !middle.trim().is_empty()
        {
            parts.push(middle);
        }
        parts.push(self.last_name.as_str());
        parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First name, abbreviated middle initial if present, last name.
    pub fn display_name(&self) -> String {
        match self.middle_name.as_deref().and_then(|m| m.chars().next()) {
            Some(initial) => format!("{} {initial}. {}", self.first_name, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// A cached analysis exactly as persisted: final numbers and flags, without
/// the per-letter breakdowns the engine also produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub profile_id: i64,
    pub system: LetterSystem,
    pub life_path: u32,
    pub life_path_master: bool,
    pub life_path_karmic_debt: Option<u32>,
    pub expression: u32,
    pub expression_master: bool,
    pub expression_karmic_debt: Option<u32>,
    pub soul_urge: u32,
    pub soul_urge_master: bool,
    pub soul_urge_karmic_debt: Option<u32>,
    pub personality: u32,
    pub personality_master: bool,
    pub personality_karmic_debt: Option<u32>,
    pub birthday: u32,
    pub birthday_master: bool,
    pub maturity: u32,
    pub maturity_master: bool,
    pub balance: u32,
    pub hidden_passion: Option<u32>,
    pub subconscious_self: u32,
    pub cornerstone: Option<u32>,
    pub capstone: Option<u32>,
    pub first_vowel: Option<u32>,
    pub karmic_lessons: BTreeSet<u32>,
    pub pinnacles: Vec<PinnaclePeriod>,
    pub challenges: Vec<ChallengePeriod>,
    pub life_periods: Vec<LifePeriod>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- Profiles ---

    /// Insert a profile and return its id. A profile marked primary demotes
    /// any existing primary.
    pub fn add_profile(
        &self,
        first_name: &str,
        middle_name: Option<&str>,
        last_name: &str,
        birth_date: Date,
        is_primary: bool,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        if is_primary {
            tx.execute("UPDATE profiles SET is_primary = 0", [])?;
        }
        tx.execute(
            "INSERT INTO profiles (first_name, middle_name, last_name, birth_date, is_primary)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                first_name,
                middle_name,
                last_name,
                birth_date.to_string(),
                is_primary as i32,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        tracing::debug!(id, "profile added");
        Ok(id)
    }

    pub fn get_profile(&self, id: i64) -> Result<Option<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, middle_name, last_name, birth_date, is_primary,
                    created_at, updated_at
             FROM profiles WHERE id = ?1",
        )?;
        let row = stmt.query_row([id], row_to_profile_parts).optional()?;
        row.map(profile_from_parts).transpose()
    }

    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, middle_name, last_name, birth_date, is_primary,
                    created_at, updated_at
             FROM profiles ORDER BY id",
        )?;
        let rows: Vec<ProfileParts> = stmt
            .query_map([], row_to_profile_parts)?
            .collect::<std::result::Result<_, _>>()?;
        rows.into_iter().map(profile_from_parts).collect()
    }

    pub fn primary_profile(&self) -> Result<Option<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, middle_name, last_name, birth_date, is_primary,
                    created_at, updated_at
             FROM profiles WHERE is_primary = 1 LIMIT 1",
        )?;
        let row = stmt.query_row([], row_to_profile_parts).optional()?;
        row.map(profile_from_parts).transpose()
    }

    /// Mark one profile as primary, demoting the rest. Returns false if the
    /// id does not exist.
    pub fn set_primary(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE profiles SET is_primary = 0", [])?;
        let changed = tx.execute(
            "UPDATE profiles SET is_primary = 1, updated_at = datetime('now') WHERE id = ?1",
            [id],
        )?;
        tx.commit()?;
        Ok(changed > 0)
    }

    /// Delete a profile with all its cached analyses and compatibilities.
    /// Returns false if the id does not exist.
    pub fn remove_profile(&self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM profiles WHERE id = ?1", [id])?;
        if removed > 0 {
            tracing::debug!(id, "profile removed");
        }
        Ok(removed > 0)
    }

    // --- Analyses ---

    /// Cache an analysis for a profile, replacing any previous one for the
    /// same letter system.
    pub fn save_analysis(&self, profile_id: i64, analysis: &Analysis) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        // dropping the old row takes its timeline children with it
        tx.execute(
            "DELETE FROM analyses WHERE profile_id = ?1 AND system = ?2",
            params![profile_id, analysis.system.as_str()],
        )?;

        tx.execute(
            "INSERT INTO analyses (
                profile_id, system,
                life_path, life_path_master, life_path_karmic_debt,
                expression, expression_master, expression_karmic_debt,
                soul_urge, soul_urge_master, soul_urge_karmic_debt,
                personality, personality_master, personality_karmic_debt,
                birthday, birthday_master,
                maturity, maturity_master,
                balance, hidden_passion, subconscious_self,
                cornerstone, capstone, first_vowel, karmic_lessons
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                       ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            params![
                profile_id,
                analysis.system.as_str(),
                analysis.life_path.final_number,
                analysis.life_path.is_master as i32,
                analysis.life_path.karmic_debt,
                analysis.expression.final_number,
                analysis.expression.is_master as i32,
                analysis.expression.karmic_debt,
                analysis.soul_urge.final_number,
                analysis.soul_urge.is_master as i32,
                analysis.soul_urge.karmic_debt,
                analysis.personality.final_number,
                analysis.personality.is_master as i32,
                analysis.personality.karmic_debt,
                analysis.birthday.final_number,
                analysis.birthday.is_master as i32,
                analysis.maturity.final_number,
                analysis.maturity.is_master as i32,
                analysis.balance.final_number,
                analysis.hidden_passion,
                analysis.subconscious_self,
                analysis.initials.cornerstone,
                analysis.initials.capstone,
                analysis.initials.first_vowel,
                join_lessons(&analysis.karmic_lessons),
            ],
        )?;
        let analysis_id = tx.last_insert_rowid();

        for p in &analysis.pinnacles {
            tx.execute(
                "INSERT INTO pinnacles (analysis_id, period_index, number, start_age, end_age, is_master)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![analysis_id, p.period_index, p.number, p.start_age, p.end_age, p.is_master as i32],
            )?;
        }
        for c in &analysis.challenges {
            tx.execute(
                "INSERT INTO challenges (analysis_id, period_index, number, start_age, end_age)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![analysis_id, c.period_index, c.number, c.start_age, c.end_age],
            )?;
        }
        for lp in &analysis.life_periods {
            tx.execute(
                "INSERT INTO life_periods (analysis_id, period_index, number, start_age, end_age, source, is_master)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    analysis_id,
                    lp.period_index,
                    lp.number,
                    lp.start_age,
                    lp.end_age,
                    lp.source.as_str(),
                    lp.is_master as i32,
                ],
            )?;
        }

        tx.commit()?;
        tracing::debug!(profile_id, system = analysis.system.as_str(), "analysis cached");
        Ok(analysis_id)
    }

    /// Load the cached analysis for a profile under one letter system.
    pub fn load_analysis(
        &self,
        profile_id: i64,
        system: LetterSystem,
    ) -> Result<Option<AnalysisRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id,
                    life_path, life_path_master, life_path_karmic_debt,
                    expression, expression_master, expression_karmic_debt,
                    soul_urge, soul_urge_master, soul_urge_karmic_debt,
                    personality, personality_master, personality_karmic_debt,
                    birthday, birthday_master,
                    maturity, maturity_master,
                    balance, hidden_passion, subconscious_self,
                    cornerstone, capstone, first_vowel, karmic_lessons
             FROM analyses WHERE profile_id = ?1 AND system = ?2",
        )?;

        let row = stmt
            .query_row(params![profile_id, system.as_str()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    AnalysisRecord {
                        profile_id,
                        system,
                        life_path: row.get(1)?,
                        life_path_master: row.get::<_, i32>(2)? != 0,
                        life_path_karmic_debt: row.get(3)?,
                        expression: row.get(4)?,
                        expression_master: row.get::<_, i32>(5)? != 0,
                        expression_karmic_debt: row.get(6)?,
                        soul_urge: row.get(7)?,
                        soul_urge_master: row.get::<_, i32>(8)? != 0,
                        soul_urge_karmic_debt: row.get(9)?,
                        personality: row.get(10)?,
                        personality_master: row.get::<_, i32>(11)? != 0,
                        personality_karmic_debt: row.get(12)?,
                        birthday: row.get(13)?,
                        birthday_master: row.get::<_, i32>(14)? != 0,
                        maturity: row.get(15)?,
                        maturity_master: row.get::<_, i32>(16)? != 0,
                        balance: row.get(17)?,
                        hidden_passion: row.get(18)?,
                        subconscious_self: row.get(19)?,
                        cornerstone: row.get(20)?,
                        capstone: row.get(21)?,
                        first_vowel: row.get(22)?,
                        karmic_lessons: BTreeSet::new(),
                        pinnacles: Vec::new(),
                        challenges: Vec::new(),
                        life_periods: Vec::new(),
                    },
                    row.get::<_, String>(23)?,
                ))
            })
            .optional()?;

        let Some((analysis_id, mut record, lessons_text)) = row else {
            return Ok(None);
        };

        record.karmic_lessons = parse_lessons(&lessons_text)?;
        record.pinnacles = self.load_pinnacles(analysis_id)?;
        record.challenges = self.load_challenges(analysis_id)?;
        record.life_periods = self.load_life_periods(analysis_id)?;

        Ok(Some(record))
    }

    fn load_pinnacles(&self, analysis_id: i64) -> Result<Vec<PinnaclePeriod>> {
        let mut stmt = self.conn.prepare(
            "SELECT period_index, number, start_age, end_age, is_master
             FROM pinnacles WHERE analysis_id = ?1 ORDER BY period_index",
        )?;
        let rows = stmt
            .query_map([analysis_id], |row| {
                Ok(PinnaclePeriod {
                    period_index: row.get(0)?,
                    number: row.get(1)?,
                    start_age: row.get(2)?,
                    end_age: row.get(3)?,
                    is_master: row.get::<_, i32>(4)? != 0,
                })
            })?
            .collect::<std::result::Result<_, _>>()?;
        Ok(rows)
    }

    fn load_challenges(&self, analysis_id: i64) -> Result<Vec<ChallengePeriod>> {
        let mut stmt = self.conn.prepare(
            "SELECT period_index, number, start_age, end_age
             FROM challenges WHERE analysis_id = ?1 ORDER BY period_index",
        )?;
        let rows = stmt
            .query_map([analysis_id], |row| {
                Ok(ChallengePeriod {
                    period_index: row.get(0)?,
                    number: row.get(1)?,
                    start_age: row.get(2)?,
                    end_age: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<_, _>>()?;
        Ok(rows)
    }

    fn load_life_periods(&self, analysis_id: i64) -> Result<Vec<LifePeriod>> {
        let mut stmt = self.conn.prepare(
            "SELECT period_index, number, start_age, end_age, source, is_master
             FROM life_periods WHERE analysis_id = ?1 ORDER BY period_index",
        )?;
        let rows: Vec<(u32, u32, u32, Option<u32>, String, i32)> = stmt
            .query_map([analysis_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(period_index, number, start_age, end_age, source, is_master)| {
                let source = PeriodSource::parse(&source).ok_or_else(|| {
                    StoreError::InvalidData(format!("unknown period source '{source}'"))
                })?;
                Ok(LifePeriod {
                    period_index,
                    number,
                    start_age,
                    end_age,
                    source,
                    is_master: is_master != 0,
                })
            })
            .collect()
    }

    // --- Compatibilities ---

    /// Cache a compatibility result for a profile pair. The pair is stored
    /// order-normalized so (a, b) and (b, a) hit the same row.
    pub fn save_compatibility(
        &self,
        profile1_id: i64,
        profile2_id: i64,
        system: LetterSystem,
        result: &CompatibilityResult,
    ) -> Result<()> {
        let (lo, hi) = ordered_pair(profile1_id, profile2_id);
        let payload = serde_json::to_string(result)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO compatibilities
             (profile1_id, profile2_id, system, overall_score, level, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                lo,
                hi,
                system.as_str(),
                result.overall_score,
                result.level.as_str(),
                payload,
            ],
        )?;
        Ok(())
    }

    pub fn load_compatibility(
        &self,
        profile1_id: i64,
        profile2_id: i64,
        system: LetterSystem,
    ) -> Result<Option<CompatibilityResult>> {
        let (lo, hi) = ordered_pair(profile1_id, profile2_id);
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM compatibilities
             WHERE profile1_id = ?1 AND profile2_id = ?2 AND system = ?3",
        )?;
        let payload: Option<String> = stmt
            .query_row(params![lo, hi, system.as_str()], |row| row.get(0))
            .optional()?;
        payload
            .map(|p| serde_json::from_str(&p).map_err(StoreError::from))
            .transpose()
    }
}

fn ordered_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn join_lessons(lessons: &BTreeSet<u32>) -> String {
    lessons
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_lessons(text: &str) -> Result<BTreeSet<u32>> {
    if text.is_empty() {
        return Ok(BTreeSet::new());
    }
    text.split(',')
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| StoreError::InvalidData(format!("bad karmic lesson '{part}'")))
        })
        .collect()
}

type ProfileParts = (i64, String, Option<String>, String, String, i32, String, String);

fn row_to_profile_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn profile_from_parts(parts: ProfileParts) -> Result<Profile> {
    let (id, first_name, middle_name, last_name, birth_date, is_primary, created_at, updated_at) =
        parts;
    let birth_date = birth_date
        .parse::<Date>()
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;
    Ok(Profile {
        id,
        first_name,
        middle_name,
        last_name,
        birth_date,
        is_primary: is_primary != 0,
        created_at,
        updated_at,
    })
}
