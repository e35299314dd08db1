use std::path::Path;

use crate::domain::DomainError;

pub const DEFAULT_OWNER_NAME: &str = "Kiriti Gunukuntla Bhasker";
const BUILTIN_RESUME: &str = include_str!("../../../resources/resume.txt");

/// Read-only grounding material for every chat request: whose portfolio this
/// is and the resume text the model must answer from.
///
/// Built once at startup and shared behind an `Arc`; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    owner_name: String,
    resume: String,
}

impl PromptContext {
    pub fn new(owner_name: impl Into<String>, resume: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            resume: resume.into(),
        }
    }

    /// The resume shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_OWNER_NAME, BUILTIN_RESUME)
    }

    /// Load the resume text from a plain-text file.
    pub fn from_file(owner_name: impl Into<String>, path: &Path) -> Result<Self, DomainError> {
        let resume = std::fs::read_to_string(path)?;
        if resume.trim().is_empty() {
            return Err(DomainError::configuration(format!(
                "resume file {} is empty",
                path.display()
            )));
        }
        Ok(Self::new(owner_name, resume))
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn resume(&self) -> &str {
        &self.resume
    }
}

impl Default for PromptContext {
    fn default() -> Self {
        Self::builtin()
    }
}
