use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::StringRecord;
use derive_new::new;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    pipelines::text_classification::{self, Label},
    utils::{download::download_if_missing, files::decode_latin1},
};

use super::{DatasetError, LoadableDataset};

/// The name of the SMS Spam Collection dataset
pub static DATASET: &str = "sms-spam";

/// Where the dataset is fetched from when it is not on disk yet
pub static DATA_URL: &str =
    "https://raw.githubusercontent.com/sahanaramesh09/SMS-Spam-Classification/master/SMSSpamCollection.csv";

/// The file name of the dataset inside its directory
pub static FILE_NAME: &str = "spam.csv";

/// Header pairs that name the `(label, message)` columns across dataset releases
pub static COLUMN_ALIASES: &[(&str, &str)] = &[("v1", "v2"), ("Class", "sms"), ("label", "message")];

/// Define a struct for SMS text classification items
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// Whether the message is spam
    pub label: Label,

    /// The raw message text
    pub message: String,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.message
    }

    fn class_label(&self) -> Label {
        self.label
    }
}

/// Which record fields hold the label and the message
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    label: usize,
    message: usize,
    headerless: bool,
}

impl Columns {
    const HEADERLESS: Columns = Columns {
        label: 0,
        message: 1,
        headerless: true,
    };

    /// Match the first record against the known header aliases
    fn from_header(header: &StringRecord) -> Option<Self> {
        let position = |name: &str| header.iter().position(|field| field.trim() == name);

        COLUMN_ALIASES.iter().find_map(|&(label, message)| {
            Some(Columns {
                label: position(label)?,
                message: position(message)?,
                headerless: false,
            })
        })
    }
}

/// Struct for the SMS Spam Collection dataset
#[derive(Debug, Clone, new)]
pub struct Dataset {
    items: Vec<Item>,
}

impl Dataset {
    /// The location of the dataset file under the data directory
    pub fn path(data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir
            .as_ref()
            .join("datasets")
            .join(DATASET)
            .join(FILE_NAME)
    }

    /// Read and parse a dataset file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::from_bytes(&bytes)?;

        info!("Loaded {} examples from {}", dataset.items.len(), path.display());

        Ok(dataset)
    }

    /// Parse Latin-1 CSV. A header naming one of the known column pairs selects those columns;
    /// otherwise every record, the first included, must have exactly two fields. Files whose
    /// first line contains a tab are read as tab-separated without quoting.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let text = decode_latin1(bytes);
        let tabbed = text.lines().next().is_some_and(|line| line.contains('\t'));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(if tabbed { b'\t' } else { b',' })
            .quoting(!tabbed)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let first = match records.next() {
            Some(record) => record?,
            None => return Err(DatasetError::Empty),
        };

        let (columns, rows): (Columns, Vec<StringRecord>) = match Columns::from_header(&first) {
            Some(columns) => {
                debug!("Header columns: {:?}", first);
                (columns, Vec::new())
            }
            None => {
                debug!("No known header found, reading as headerless two-column data");
                (Columns::HEADERLESS, vec![first])
            }
        };

        let mut items = Vec::new();

        for record in rows.into_iter().map(Ok::<_, csv::Error>).chain(records) {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if columns.headerless && record.len() != 2 {
                return Err(DatasetError::Schema(format!(
                    "line {line}: expected a known header or exactly 2 columns, found {}",
                    record.len()
                )));
            }

            let (Some(label), Some(message)) = (record.get(columns.label), record.get(columns.message))
            else {
                return Err(DatasetError::Schema(format!(
                    "line {line}: missing label or message column"
                )));
            };

            let label = label
                .parse::<Label>()
                .map_err(|source| DatasetError::UnknownLabel { line, source })?;

            items.push(Item::new(label, message.to_string()));
        }

        if items.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { items })
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    async fn load(data_dir: &str, url: &str) -> Result<Self, DatasetError> {
        let path = Self::path(data_dir);

        download_if_missing(url, &path).await?;

        Self::from_path(&path).await
    }

    fn items(&self) -> &[Item] {
        &self.items
    }
}
