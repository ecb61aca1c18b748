//! Post-meeting member evaluation (badges).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse rating given to a co-member after a completed meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeType {
    Good,
    Normal,
    Bad,
}

impl BadgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeType::Good => "good",
            BadgeType::Normal => "normal",
            BadgeType::Bad => "bad",
        }
    }
}

impl FromStr for BadgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(BadgeType::Good),
            "normal" => Ok(BadgeType::Normal),
            "bad" => Ok(BadgeType::Bad),
            other => Err(format!("unknown badge '{other}' (good|normal|bad)")),
        }
    }
}

/// How many of each badge a user has received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeCount {
    pub badge: BadgeType,
    pub count: u32,
}

/// A member that can still be evaluated for a given meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationTarget {
    pub user_id: i64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub already_evaluated: bool,
}

/// One submitted rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationEntry {
    pub target_id: i64,
    pub badge: BadgeType,
}

/// `POST /evaluations/:meetingId` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEvaluationsRequest {
    pub evaluations: Vec<EvaluationEntry>,
}
