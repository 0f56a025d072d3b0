use serde::{Deserialize, Serialize};

/// What the screener is hiring for. Flattened into a single query document
/// before ranking; the ranker never sees the individual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCriteria {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobCriteria {
    pub fn new(role: impl Into<String>, experience: impl Into<String>, skills: Vec<String>) -> Self {
        Self { role: role.into(), experience: experience.into(), skills }
    }

    /// Role, experience level and skills joined with single spaces.
    pub fn to_query(&self) -> String {
        format!("{} {} {}", self.role, self.experience, self.skills.join(" "))
    }

    /// No field carries any text, so there is nothing to rank against.
    pub fn is_empty(&self) -> bool {
        self.role.trim().is_empty()
            && self.experience.trim().is_empty()
            && self.skills.iter().all(|s| s.trim().is_empty())
    }
}
