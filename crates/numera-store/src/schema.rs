use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name  TEXT NOT NULL,
            middle_name TEXT,
            last_name   TEXT NOT NULL,
            birth_date  TEXT NOT NULL,
            is_primary  INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS analyses (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            profile_id             INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            system                 TEXT NOT NULL,
            life_path              INTEGER NOT NULL,
            life_path_master       INTEGER NOT NULL DEFAULT 0,
            life_path_karmic_debt  INTEGER,
            expression             INTEGER NOT NULL,
            expression_master      INTEGER NOT NULL DEFAULT 0,
            expression_karmic_debt INTEGER,
            soul_urge              INTEGER NOT NULL,
            soul_urge_master       INTEGER NOT NULL DEFAULT 0,
            soul_urge_karmic_debt  INTEGER,
            personality            INTEGER NOT NULL,
            personality_master     INTEGER NOT NULL DEFAULT 0,
            personality_karmic_debt INTEGER,
            birthday               INTEGER NOT NULL,
            birthday_master        INTEGER NOT NULL DEFAULT 0,
            maturity               INTEGER NOT NULL,
            maturity_master        INTEGER NOT NULL DEFAULT 0,
            balance                INTEGER NOT NULL,
            hidden_passion         INTEGER,
            subconscious_self      INTEGER NOT NULL,
            cornerstone            INTEGER,
            capstone               INTEGER,
            first_vowel            INTEGER,
            karmic_lessons         TEXT NOT NULL DEFAULT '',
            calculated_at          TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (profile_id, system)
        );

        CREATE TABLE IF NOT EXISTS pinnacles (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            analysis_id  INTEGER NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
            period_index INTEGER NOT NULL,
            number       INTEGER NOT NULL,
            start_age    INTEGER NOT NULL,
            end_age      INTEGER,
            is_master    INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS challenges (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            analysis_id  INTEGER NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
            period_index INTEGER NOT NULL,
            number       INTEGER NOT NULL,
            start_age    INTEGER NOT NULL,
            end_age      INTEGER
        );

        CREATE TABLE IF NOT EXISTS life_periods (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            analysis_id  INTEGER NOT NULL REFERENCES analyses(id) ON DELETE CASCADE,
            period_index INTEGER NOT NULL,
            number       INTEGER NOT NULL,
            start_age    INTEGER NOT NULL,
            end_age      INTEGER,
            source       TEXT NOT NULL,
            is_master    INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS compatibilities (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            profile1_id  INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            profile2_id  INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            system       TEXT NOT NULL,
            overall_score INTEGER NOT NULL,
            level        TEXT NOT NULL,
            payload      TEXT NOT NULL,
            calculated_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (profile1_id, profile2_id, system)
        );

        CREATE INDEX IF NOT EXISTS idx_analyses_profile ON analyses(profile_id);
        CREATE INDEX IF NOT EXISTS idx_pinnacles_analysis ON pinnacles(analysis_id);
        CREATE INDEX IF NOT EXISTS idx_challenges_analysis ON challenges(analysis_id);
        CREATE INDEX IF NOT EXISTS idx_periods_analysis ON life_periods(analysis_id);
        CREATE INDEX IF NOT EXISTS idx_compat_profiles ON compatibilities(profile1_id, profile2_id);
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        for table in &[
            "metadata",
            "profiles",
            "analyses",
            "pinnacles",
            "challenges",
            "life_periods",
            "compatibilities",
        ] {
            let count: i64 = conn
                .query_row(&format!("SELECT count(*) FROM {table}"), [], |row| {
                    row.get(0)
                })
                .unwrap();
            assert!(count >= 0, "table {table} should exist");
        }
    }

    #[test]
    fn test_schema_version_set() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_idempotent_initialize() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap(); // should not error
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_analysis_unique_per_profile_and_system() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO profiles (first_name, last_name, birth_date) VALUES ('A', 'B', '1990-05-15')",
            [],
        )
        .unwrap();

        let insert = "INSERT INTO analyses (profile_id, system, life_path, expression, soul_urge,
             personality, birthday, maturity, balance, subconscious_self)
             VALUES (1, 'pythagorean', 3, 8, 6, 11, 6, 11, 2, 7)";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err(), "duplicate must be rejected");
    }
}
