// src/storage/mod.rs
use crate::edgar::models::CompanyEntry;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// What the writer did with one fetched filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Text written (or overwritten) at this path.
    Written(PathBuf),
    /// Resolved year matched the expected year and the file already exists.
    Unchanged(PathBuf),
    /// No fiscal year in the text; nothing written.
    NotFound,
}

/// A fetched, normalized filing ready to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct FilingText<'a> {
    pub company: &'a CompanyEntry,
    pub expected_year: &'a str,
    pub source_url: &'a str,
    pub text: &'a str,
}

pub struct StorageManager {
    base_dir: PathBuf,
    write_metadata: bool,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self {
            base_dir: base_path,
            write_metadata: false,
        })
    }

    /// Also write a `<year>.json` sidecar next to each text file.
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.write_metadata = enabled;
        self
    }

    pub fn company_dir(&self, company_name: &str) -> PathBuf {
        // Keep the company inside base_dir whatever its display name contains.
        let mut folder: String = company_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        // "." and ".." would resolve onto or above base_dir.
        if folder.chars().all(|c| c == '.') {
            folder = folder.replace('.', "_");
            if folder.is_empty() {
                folder.push('_');
            }
        }
        self.base_dir.join(folder)
    }

    pub fn year_path(&self, company_name: &str, year: &str) -> PathBuf {
        self.company_dir(company_name).join(format!("{}.txt", year))
    }

    /// Persist `filing` under its resolved fiscal year.
    ///
    /// A resolved year always writes (overwriting), except when it equals the
    /// expected year and that file is already on disk.
    pub fn write_resolved(&self, filing: FilingText<'_>, resolved_year: Option<&str>) -> Result<WriteOutcome, StorageError> {
        let Some(year) = resolved_year else {
            tracing::info!("Fiscal year information not found in the text.");
            return Ok(WriteOutcome::NotFound);
        };

        let path = self.year_path(&filing.company.name, year);
        if year == filing.expected_year && path.exists() {
            tracing::info!("Year same, no change needed: {}", path.display());
            return Ok(WriteOutcome::Unchanged(path));
        }

        let path = self.save_filing_text(&filing.company.name, year, filing.text)?;
        if self.write_metadata {
            self.save_filing_metadata(filing, year)?;
        }
        Ok(WriteOutcome::Written(path))
    }

    /// Writes `text` to `<base>/<company>/<year>.txt`, creating the folder if needed.
    pub fn save_filing_text(&self, company_name: &str, year: &str, text: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.company_dir(company_name);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }

        let file_path = self.year_path(company_name, year);
        fs::write(&file_path, text).map_err(StorageError::IoError)?;

        tracing::info!("Text content scraped and saved to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the filing in JSON format
    pub fn save_filing_metadata(&self, filing: FilingText<'_>, resolved_year: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.company_dir(&filing.company.name);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }

        let file_path = target_dir.join(format!("{}.json", resolved_year));

        let metadata = serde_json::json!({
            "company_name": filing.company.name,
            "ticker": filing.company.ticker,
            "expected_year": filing.expected_year,
            "fiscal_year": resolved_year,
            "source_url": filing.source_url,
            "content_length": filing.text.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::debug!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn filing<'a>(company: &'a CompanyEntry, expected: &'a str, text: &'a str) -> FilingText<'a> {
        FilingText {
            company,
            expected_year: expected,
            source_url: "https://www.sec.gov/Archives/edgar/data/915913/alb-20201231.htm",
            text,
        }
    }

    #[test]
    fn test_new_creates_base_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("nested/output");
        StorageManager::new(&base).unwrap();
        assert!(base.is_dir());
    }

    #[test]
    fn test_writes_under_resolved_year() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let company = CompanyEntry::new("Albemarle", "ALB");

        let outcome = storage
            .write_resolved(filing(&company, "2021", "fiscal year ended 2020"), Some("2020"))
            .unwrap();

        let expected_path = dir.path().join("Albemarle").join("2020.txt");
        assert_eq!(outcome, WriteOutcome::Written(expected_path.clone()));
        assert_eq!(fs::read_to_string(expected_path).unwrap(), "fiscal year ended 2020");
        assert!(!dir.path().join("Albemarle").join("2021.txt").exists());
    }

    #[test]
    fn test_second_write_overwrites() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let company = CompanyEntry::new("Mosaic", "MOS");

        storage.write_resolved(filing(&company, "2019", "first"), Some("2018")).unwrap();
        storage.write_resolved(filing(&company, "2019", "second"), Some("2018")).unwrap();

        let content = fs::read_to_string(dir.path().join("Mosaic/2018.txt")).unwrap();
        assert_eq!(content, "second");
        assert_eq!(fs::read_dir(dir.path().join("Mosaic")).unwrap().count(), 1);
    }

    #[test]
    fn test_matching_year_with_existing_file_is_unchanged() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let company = CompanyEntry::new("PPG", "PPG");

        let first = storage.write_resolved(filing(&company, "2020", "original"), Some("2020")).unwrap();
        assert!(matches!(first, WriteOutcome::Written(_)));

        let second = storage.write_resolved(filing(&company, "2020", "replacement"), Some("2020")).unwrap();
        assert_eq!(second, WriteOutcome::Unchanged(dir.path().join("PPG/2020.txt")));
        assert_eq!(fs::read_to_string(dir.path().join("PPG/2020.txt")).unwrap(), "original");
    }

    #[test]
    fn test_absent_year_writes_nothing() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let company = CompanyEntry::new("Huntsman", "HUN");

        let outcome = storage.write_resolved(filing(&company, "2020", "no keyword"), None).unwrap();
        assert_eq!(outcome, WriteOutcome::NotFound);
        assert!(!dir.path().join("Huntsman").exists());
    }

    #[test]
    fn test_metadata_sidecar() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap().with_metadata(true);
        let company = CompanyEntry::new("Celanese", "CE");

        storage.write_resolved(filing(&company, "2021", "body text"), Some("2020")).unwrap();

        let raw = fs::read_to_string(dir.path().join("Celanese/2020.json")).unwrap();
        let meta: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(meta["ticker"], "CE");
        assert_eq!(meta["expected_year"], "2021");
        assert_eq!(meta["fiscal_year"], "2020");
        assert_eq!(meta["content_length"], 9);
    }

    #[test]
    fn test_company_folder_is_sanitized() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        assert_eq!(storage.company_dir("A/B"), dir.path().join("A_B"));
    }

    #[test]
    fn test_dot_only_company_names_stay_inside_base() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        assert_eq!(storage.company_dir(".."), dir.path().join("__"));
        assert_eq!(storage.company_dir("."), dir.path().join("_"));
        assert_eq!(storage.company_dir(""), dir.path().join("_"));
        // Dots inside a real name are left alone.
        assert_eq!(storage.company_dir("Ross Stores Inc."), dir.path().join("Ross Stores Inc."));

        let company = CompanyEntry::new("..", "DOT");
        let outcome = storage
            .write_resolved(filing(&company, "2020", "fiscal year ended 2020"), Some("2020"))
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Written(dir.path().join("__").join("2020.txt")));
    }
}
