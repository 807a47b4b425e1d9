use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MISSING_TEXT: &str = "N/A";
pub const MISSING_PRIORITY: i64 = 0;

/// A priority as the model sent it.
///
/// Integral numbers (`4`, `4.0`) become a `Score`; anything else is kept
/// verbatim as `Raw` so it can still be shown and exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Priority {
    Score(i64),
    Raw(String),
}

impl Priority {
    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Score(i),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Self::Score(f as i64)
                    }
                    _ => Self::Raw(n.to_string()),
                },
            }),
            Value::String(s) => Some(Self::Raw(s)),
            other => Some(Self::Raw(other.to_string())),
        }
    }

    pub fn score(&self) -> Option<i64> {
        match self {
            Self::Score(i) => Some(*i),
            Self::Raw(_) => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Score(i) => write!(f, "{i}"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

/// One structured result produced by the model for one input task line.
///
/// Every field is optional on the wire and accepts any JSON value, so one
/// sloppy item never costs the rest of the array. Absent or `null` fields are
/// kept as `None` and filled by the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_task: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_tags",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

impl TaskItem {
    pub fn original_task(&self) -> &str {
        self.original_task.as_deref().unwrap_or(MISSING_TEXT)
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(MISSING_TEXT)
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Integral priority; missing reads as 0, a non-integral value as `None`.
    pub fn priority_score(&self) -> Option<i64> {
        match &self.priority {
            Some(p) => p.score(),
            None => Some(MISSING_PRIORITY),
        }
    }

    /// Priority as displayed and exported.
    pub fn priority_label(&self) -> String {
        match &self.priority {
            Some(p) => p.to_string(),
            None => MISSING_PRIORITY.to_string(),
        }
    }

    pub fn joined_tags(&self) -> String {
        self.tags().join(", ")
    }
}

/// Ordered items from a single model call.
pub type ResultSet = Vec<TaskItem>;

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(d)?))
}

// Only an array counts as tags; its non-string entries are stringified.
fn lenient_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => Some(values.into_iter().filter_map(text_of).collect()),
        _ => None,
    })
}

fn lenient_priority<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Priority>, D::Error> {
    Ok(Priority::from_json(Value::deserialize(d)?))
}
