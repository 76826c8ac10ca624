//! Job catalog: the read-only set of job postings candidates are evaluated against.
//!
//! Built once at startup from a JSON seed file. Ids are assigned 1.. in seed order;
//! a row whose title repeats an earlier one (case-insensitive) is skipped.

pub mod handlers;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const STANDARD_SEED: &str = include_str!("../../data/jobs_seed.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read job seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid job seed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("job seed row {row} has an empty {field}")]
    EmptyField { row: usize, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct SeedRow {
    title: String,
    description: String,
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<Job>,
}

impl JobCatalog {
    /// The catalog bundled with the service.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json(STANDARD_SEED)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let rows: Vec<SeedRow> = serde_json::from_str(text)?;
        let mut seen_titles = HashSet::new();
        let mut jobs = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            let title = row.title.trim();
            if title.is_empty() {
                return Err(CatalogError::EmptyField {
                    row: row_number,
                    field: "title",
                });
            }
            if row.description.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    row: row_number,
                    field: "description",
                });
            }
            if !seen_titles.insert(title.to_lowercase()) {
                warn!("Skipping duplicate job '{title}' in seed row {row_number}");
                continue;
            }

            jobs.push(Job {
                id: jobs.len() as u32 + 1,
                title: title.to_string(),
                description: row.description,
                skills: row
                    .skills
                    .iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
            });
        }

        Ok(Self { jobs })
    }

    pub fn get(&self, id: u32) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// All jobs, ordered by title.
    pub fn list(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.iter().collect();
        jobs.sort_by_key(|job| job.title.to_lowercase());
        jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_catalog_loads() {
        let catalog = JobCatalog::standard().unwrap();
        assert!(!catalog.is_empty());
        let backend = catalog.get(1).unwrap();
        assert_eq!(backend.title, "Backend Developer");
        assert!(backend.description.contains("Python"));
    }

    #[test]
    fn test_ids_follow_seed_order_and_list_sorts_by_title() {
        let catalog = JobCatalog::from_json(
            r#"[
                {"title": "Zeta Role", "description": "rust"},
                {"title": "alpha role", "description": "go", "skills": [" Go ", ""]}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.get(1).unwrap().title, "Zeta Role");
        assert_eq!(catalog.get(2).unwrap().skills, vec!["go"]);
        let titles: Vec<&str> = catalog.list().iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha role", "Zeta Role"]);
    }

    #[test]
    fn test_duplicate_titles_are_skipped() {
        let catalog = JobCatalog::from_json(
            r#"[
                {"title": "Data Analyst", "description": "sql"},
                {"title": "data analyst ", "description": "pandas"},
                {"title": "Designer", "description": "figma"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().description, "sql");
        assert_eq!(catalog.get(2).unwrap().title, "Designer");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let err = JobCatalog::from_json(r#"[{"title": "Dev", "description": "  "}]"#).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyField {
                row: 1,
                field: "description"
            }
        ));
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        assert!(matches!(
            JobCatalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path_reads_seed_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"title": "SRE", "description": "on-call and docker"}]"#)
            .unwrap();
        file.flush().unwrap();
        let catalog = JobCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.get(1).unwrap().title, "SRE");
        assert!(matches!(
            JobCatalog::from_path(Path::new("/nonexistent/jobs.json")),
            Err(CatalogError::Io(_))
        ));
    }
}
