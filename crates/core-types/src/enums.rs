use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A reader's verdict on a joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Like,
    Dislike,
}

impl VoteAction {
    /// Parses the optional `action` field of a vote request.
    /// A missing field is as invalid as an unknown one.
    pub fn parse(action: Option<&str>) -> Result<Self, CoreError> {
        match action {
            Some(action) => action.parse(),
            None => Err(CoreError::InvalidAction(None)),
        }
    }
}

impl FromStr for VoteAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(VoteAction::Like),
            "dislike" => Ok(VoteAction::Dislike),
            other => Err(CoreError::InvalidAction(Some(other.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_actions() {
        assert_eq!("like".parse::<VoteAction>(), Ok(VoteAction::Like));
        assert_eq!("dislike".parse::<VoteAction>(), Ok(VoteAction::Dislike));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_actions() {
        for raw in ["neutral", "Like", "DISLIKE", "", " like"] {
            assert_eq!(
                raw.parse::<VoteAction>(),
                Err(CoreError::InvalidAction(Some(raw.to_string())))
            );
        }
    }

    #[test]
    fn missing_action_is_invalid() {
        assert_eq!(VoteAction::parse(None), Err(CoreError::InvalidAction(None)));
        assert_eq!(VoteAction::parse(Some("like")), Ok(VoteAction::Like));
    }
}
