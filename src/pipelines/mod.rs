/// Text Classification
pub mod text_classification;

/// Available Pipelines
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Pipeline {
    /// Text Classification
    TextClassification,
}

impl Pipeline {
    /// Get the unique string token that identifies this pipeline
    pub fn as_str(&self) -> &str {
        match self {
            Pipeline::TextClassification => text_classification::PIPELINE,
        }
    }

    /// Get the default model for this pipeline
    pub fn default_model(&self) -> &'static str {
        match self {
            Pipeline::TextClassification => text_classification::DEFAULT_MODEL,
        }
    }
}

impl TryFrom<&str> for Pipeline {
    type Error = PipelineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == text_classification::PIPELINE {
            Ok(Pipeline::TextClassification)
        } else {
            Err(PipelineError::Unknown(value.to_string()))
        }
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// No pipeline found for the given string
    #[error("no pipeline found for {0}")]
    Unknown(String),
}
