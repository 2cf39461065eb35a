//! JSON profile export/import. The wire format keeps the camelCase field
//! names and split date fields of the original export files, so old backups
//! import cleanly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use numera_core::Date;

use crate::error::{Result, StoreError};
use crate::store::{Profile, Store};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileExport {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birth_year: i32,
    pub birth_month: u32,
    pub birth_day: u32,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<&Profile> for ProfileExport {
    fn from(profile: &Profile) -> Self {
        ProfileExport {
            first_name: profile.first_name.clone(),
            middle_name: profile.middle_name.clone(),
            last_name: profile.last_name.clone(),
            birth_year: profile.birth_date.year(),
            birth_month: profile.birth_date.month(),
            birth_day: profile.birth_date.day(),
            is_primary: profile.is_primary,
        }
    }
}

impl ProfileExport {
    fn birth_date(&self) -> Result<Date> {
        Date::new(self.birth_year, self.birth_month, self.birth_day).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid birth date {:04}-{:02}-{:02}",
                self.birth_year, self.birth_month, self.birth_day
            ))
        })
    }
}

impl Store {
    /// Export every profile as a JSON string.
    pub fn export_json_string(&self) -> Result<String> {
        let profiles = self.list_profiles()?;
        let exports: Vec<ProfileExport> = profiles.iter().map(ProfileExport::from).collect();
        Ok(serde_json::to_string_pretty(&exports)?)
    }

    /// Export every profile to a JSON file.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json).map_err(|e| {
            StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Import profiles from a JSON string. Returns the number imported.
    /// Imported profiles are appended; an imported primary demotes the
    /// current one.
    pub fn import_json_str(&self, json: &str) -> Result<usize> {
        let exports: Vec<ProfileExport> = serde_json::from_str(json)?;
        for export in &exports {
            let birth_date = export.birth_date()?;
            self.add_profile(
                &export.first_name,
                export.middle_name.as_deref(),
                &export.last_name,
                birth_date,
                export.is_primary,
            )?;
        }
        tracing::info!(count = exports.len(), "profiles imported");
        Ok(exports.len())
    }

    /// Import profiles from a JSON file. Returns the number imported.
    pub fn import_json_file(&self, path: &Path) -> Result<usize> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        self.import_json_str(&json)
    }
}
