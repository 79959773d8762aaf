use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The class label for "not spam"
pub static HAM: &str = "ham";

/// The class label for spam
pub static SPAM: &str = "spam";

/// The two classes a message can belong to. Variants are ordered the way the label strings sort,
/// which is also the order used to break ties during prediction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// A legitimate message
    Ham,

    /// An unsolicited message
    Spam,
}

impl Label {
    /// Every label, in class order
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// The position of this label in class order
    pub fn index(&self) -> usize {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    /// The unique string token for this label
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ham => HAM,
            Label::Spam => SPAM,
        }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();

        if normalized == HAM {
            Ok(Label::Ham)
        } else if normalized == SPAM {
            Ok(Label::Spam)
        } else {
            Err(LabelError::Unknown(value.to_string()))
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    /// The value is neither "spam" nor "ham"
    #[error("unknown label {0:?}, expected \"spam\" or \"ham\"")]
    Unknown(String),
}
