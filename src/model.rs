use serde::Deserialize;

// duration comes back as a number from some backends and a string from others
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Duration {
    Number(f64),
    Text(String),
    Null,
}

impl Default for Duration {
    fn default() -> Self {
        Duration::Number(0.0)
    }
}

impl Duration {
    /// Whole seconds, truncating any fraction. Null and blank text count as zero.
    pub fn seconds(&self) -> Option<u64> {
        let value = match self {
            Duration::Number(n) => *n,
            Duration::Text(s) if s.trim().is_empty() => 0.0,
            Duration::Text(s) => s.trim().parse::<f64>().ok()?,
            Duration::Null => 0.0,
        };
        if value.is_finite() && value >= 0.0 {
            Some(value as u64)
        } else {
            None
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ApiFile {
    pub url: String,
    #[serde(default)]
    pub duration: Duration,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ApiEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    pub file: ApiFile,
}
