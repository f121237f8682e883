use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: i16,
}

/// Where a user account came from (`users.source`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum UserSource {
    Direct,
    Facebook,
    Google,
}

impl UserSource {
    pub fn code(self) -> i16 {
        match self {
            UserSource::Direct => 1,
            UserSource::Facebook => 2,
            UserSource::Google => 3,
        }
    }
}

impl From<UserSource> for i16 {
    fn from(value: UserSource) -> Self {
        value.code()
    }
}

impl TryFrom<i16> for UserSource {
    type Error = UnknownCode;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UserSource::Direct),
            2 => Ok(UserSource::Facebook),
            3 => Ok(UserSource::Google),
            _ => Err(UnknownCode {
                kind: "user source",
                code,
            }),
        }
    }
}

/// What a user did (`activities.action_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum ActionType {
    Login,
    CreatePost,
    Comment,
    ReadPost,
}

impl ActionType {
    pub fn code(self) -> i16 {
        match self {
            ActionType::Login => 1,
            ActionType::CreatePost => 2,
            ActionType::Comment => 3,
            ActionType::ReadPost => 4,
        }
    }
}

impl From<ActionType> for i16 {
    fn from(value: ActionType) -> Self {
        value.code()
    }
}

impl TryFrom<i16> for ActionType {
    type Error = UnknownCode;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ActionType::Login),
            2 => Ok(ActionType::CreatePost),
            3 => Ok(ActionType::Comment),
            4 => Ok(ActionType::ReadPost),
            _ => Err(UnknownCode {
                kind: "action type",
                code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_codes_match_column_comment() {
        assert_eq!(UserSource::Direct.code(), 1);
        assert_eq!(UserSource::Facebook.code(), 2);
        assert_eq!(UserSource::Google.code(), 3);
        assert_eq!(UserSource::try_from(3), Ok(UserSource::Google));
    }

    #[test]
    fn action_codes_match_column_comment() {
        assert_eq!(ActionType::try_from(1), Ok(ActionType::Login));
        assert_eq!(ActionType::try_from(2), Ok(ActionType::CreatePost));
        assert_eq!(ActionType::try_from(3), Ok(ActionType::Comment));
        assert_eq!(ActionType::try_from(4), Ok(ActionType::ReadPost));
    }

    #[test]
    fn rejects_unknown_codes() {
        let err = UserSource::try_from(0).unwrap_err();
        assert_eq!(err.code, 0);
        assert_eq!(err.to_string(), "unknown user source code 0");
        assert!(ActionType::try_from(5).is_err());
    }

    #[test]
    fn serializes_as_numeric_code() {
        assert_eq!(serde_json::to_string(&ActionType::ReadPost).unwrap(), "4");
        let source: UserSource = serde_json::from_str("2").unwrap();
        assert_eq!(source, UserSource::Facebook);
        assert!(serde_json::from_str::<UserSource>("9").is_err());
    }
}
