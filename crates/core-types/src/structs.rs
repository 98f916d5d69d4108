use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Length limit of `categories.name`, in characters.
pub const MAX_CATEGORY_NAME_LEN: usize = 200;

/// A row of the `jokes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Joke {
    pub id: i32,
    /// Free-text label as sent on creation; rewritten when a category is assigned.
    pub category: Option<String>,
    pub joke: Option<String>,
    pub likes: i32,
    pub dislikes: i32,
}

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// The like/dislike counters of a single joke, as returned after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct JokeCounts {
    pub id: i32,
    pub likes: i32,
    pub dislikes: i32,
}

// --- Request bodies ---

/// Body of `POST /jokes`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJoke {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub joke: Option<String>,
}

impl NewJoke {
    /// The category this joke should be linked to, if any.
    ///
    /// The label itself is stored exactly as sent. It only names a category
    /// when it is non-blank and fits `categories.name`.
    pub fn category_to_link(&self) -> Option<&str> {
        self.category.as_deref().filter(|label| {
            !label.trim().is_empty() && label.chars().count() <= MAX_CATEGORY_NAME_LEN
        })
    }
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `PUT /jokes/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub action: Option<String>,
}

/// Body of `PUT /jokes/:id/counts`. Missing counters are set to zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SetCounts {
    #[serde(default)]
    pub likes: i32,
    #[serde(default)]
    pub dislikes: i32,
}

/// Body of `POST /jokes/:id/category`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignCategory {
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_joke(category: Option<&str>) -> NewJoke {
        serde_json::from_value(json!({ "category": category, "joke": "x" })).unwrap()
    }

    #[test]
    fn labels_are_kept_exactly_as_sent() {
        for label in [" puns ", "", "   "] {
            assert_eq!(new_joke(Some(label)).category.as_deref(), Some(label));
        }
        let joke: NewJoke = serde_json::from_value(json!({ "joke": "x" })).unwrap();
        assert_eq!(joke.category, None);
    }

    #[test]
    fn only_non_blank_labels_that_fit_are_linked() {
        assert_eq!(new_joke(Some(" puns ")).category_to_link(), Some(" puns "));
        assert_eq!(new_joke(Some("")).category_to_link(), None);
        assert_eq!(new_joke(Some("   ")).category_to_link(), None);
        assert_eq!(new_joke(None).category_to_link(), None);

        let longest = "é".repeat(MAX_CATEGORY_NAME_LEN);
        assert_eq!(new_joke(Some(longest.as_str())).category_to_link(), Some(longest.as_str()));
        let too_long = "x".repeat(MAX_CATEGORY_NAME_LEN + 1);
        assert_eq!(new_joke(Some(too_long.as_str())).category_to_link(), None);
    }

    #[test]
    fn set_counts_defaults_missing_fields_to_zero() {
        let counts: SetCounts = serde_json::from_value(json!({ "likes": 7 })).unwrap();
        assert_eq!(counts.likes, 7);
        assert_eq!(counts.dislikes, 0);

        let counts: SetCounts = serde_json::from_value(json!({})).unwrap();
        assert_eq!((counts.likes, counts.dislikes), (0, 0));
    }

    #[test]
    fn joke_serializes_with_all_columns() {
        let joke = Joke {
            id: 3,
            category: Some("puns".into()),
            joke: Some("I used to be a banker, but I lost interest.".into()),
            likes: 2,
            dislikes: 0,
        };
        let value = serde_json::to_value(&joke).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "category": "puns",
                "joke": "I used to be a banker, but I lost interest.",
                "likes": 2,
                "dislikes": 0
            })
        );
    }
}
