use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use log::warn;

use crate::datasets::sms_spam;

use super::download::download_if_missing;

/// Where the English stop-word list is fetched from
pub static STOP_WORDS_URL: &str =
    "https://raw.githubusercontent.com/stopwords-iso/stopwords-en/master/stopwords-en.txt";

/// A named file the tools expect under the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Display name
    pub name: &'static str,

    /// Location relative to the data directory
    pub path: PathBuf,

    /// Where to fetch it from when missing
    pub url: &'static str,
}

/// The resources the trainer can use
pub fn default_resources() -> Vec<Resource> {
    vec![
        Resource {
            name: "sms-spam-collection",
            path: sms_spam::Dataset::path(""),
            url: sms_spam::DATA_URL,
        },
        Resource {
            name: "stopwords-en",
            path: Path::new("resources").join("stopwords").join("english.txt"),
            url: STOP_WORDS_URL,
        },
    ]
}

/// The state of one resource after verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Already present
    Found,

    /// Missing, then fetched
    Downloaded,

    /// Missing and could not be fetched
    Failed(String),
}

/// The verification result for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// The resource name
    pub name: &'static str,

    /// What happened
    pub status: Status,
}

impl Check {
    /// Whether the resource is usable now
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, Status::Failed(_))
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            Status::Found => write!(f, "[OK] {} found.", self.name),
            Status::Downloaded => write!(f, "[OK] {} downloaded.", self.name),
            Status::Failed(reason) => {
                write!(f, "[ERROR] Failed to download {}: {}", self.name, reason)
            }
        }
    }
}

/// Check each resource under `data_dir`, fetching the missing ones
pub async fn verify(data_dir: impl AsRef<Path>, resources: &[Resource]) -> Vec<Check> {
    let mut checks = Vec::with_capacity(resources.len());

    for resource in resources {
        let path = data_dir.as_ref().join(&resource.path);

        let status = if path.exists() {
            Status::Found
        } else {
            warn!(
                "[MISSING] {} not found at {}. Attempting download...",
                resource.name,
                path.display()
            );

            match download_if_missing(resource.url, &path).await {
                Ok(_) => Status::Downloaded,
                Err(err) => Status::Failed(err.to_string()),
            }
        };

        checks.push(Check {
            name: resource.name,
            status,
        });
    }

    checks
}
