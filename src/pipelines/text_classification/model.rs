use super::label::Label;

/// A trait for models that can be used for Text Classification. Implementors take raw text and
/// own every transform between the text and the decision.
pub trait Model: Send + Sync {
    /// Classify a single message
    fn predict(&self, text: &str) -> Label;
}
