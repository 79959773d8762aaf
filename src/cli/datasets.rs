use std::fmt::Display;

use crate::datasets::sms_spam;

/// The Dataset enum
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dataset {
    /// SMS Spam Collection dataset
    SmsSpam,
}

impl Dataset {
    /// Where the dataset is downloaded from by default
    pub fn default_url(&self) -> &'static str {
        match self {
            Dataset::SmsSpam => sms_spam::DATA_URL,
        }
    }
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.to_lowercase() == sms_spam::DATASET {
            Ok(Dataset::SmsSpam)
        } else {
            Err(Self::Error::Unknown(value.to_string()))
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::SmsSpam => sms_spam::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_dataset_names() {
        assert_eq!(Dataset::try_from("SMS-Spam").unwrap(), Dataset::SmsSpam);
        assert_eq!(Dataset::SmsSpam.to_string(), "sms-spam");
        assert!(Dataset::try_from("snips").is_err());
    }
}
