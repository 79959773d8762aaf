use liquid::model::Value;

use crate::pipelines::text_classification::{InferenceError, Label};

/// The page template
pub static TEMPLATE: &str = include_str!("index.html");

/// The result region of the page. Exactly one is shown after each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// The message was classified as spam
    Spam,

    /// The message was classified as ham
    Ham,

    /// Nothing was entered
    EmptyInput,

    /// No model is loaded
    ModelMissing,
}

impl Banner {
    /// Map a classification outcome to what the user sees
    pub fn from_outcome(outcome: &Result<Label, InferenceError>) -> Self {
        match outcome {
            Ok(Label::Spam) => Banner::Spam,
            Ok(Label::Ham) => Banner::Ham,
            Err(InferenceError::EmptyInput) => Banner::EmptyInput,
            Err(InferenceError::ModelUnavailable) => Banner::ModelMissing,
        }
    }

    /// The CSS class of the result card
    pub fn kind(&self) -> &'static str {
        match self {
            Banner::Spam => "spam",
            Banner::Ham => "ham",
            Banner::EmptyInput => "warning",
            Banner::ModelMissing => "error",
        }
    }

    /// The headline of the result card
    pub fn title(&self) -> &'static str {
        match self {
            Banner::Spam => "🚨 SPAM DETECTED",
            Banner::Ham => "✅ NOT SPAM (HAM)",
            Banner::EmptyInput => "⚠️ NO MESSAGE",
            Banner::ModelMissing => "❌ MODEL UNAVAILABLE",
        }
    }

    /// The sentence under the result card
    pub fn detail(&self) -> String {
        match self {
            Banner::Spam => "This message looks like a potential spam or scam.".to_string(),
            Banner::Ham => "This message appears to be safe.".to_string(),
            Banner::EmptyInput => capitalize(&InferenceError::EmptyInput.to_string()),
            Banner::ModelMissing => capitalize(&InferenceError::ModelUnavailable.to_string()),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).chain(['.']).collect(),
        None => String::new(),
    }
}

/// The parsed page template
pub struct Page {
    template: liquid::Template,
}

impl Page {
    /// Parse the built-in template
    pub fn new() -> Result<Self, liquid::Error> {
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(TEMPLATE)?;

        Ok(Self { template })
    }

    /// Render the form, echoing `message`, with an optional result region
    pub fn render(&self, message: &str, banner: Option<Banner>) -> Result<String, liquid::Error> {
        let banner = match banner {
            Some(banner) => Value::Object(liquid::object!({
                "kind": banner.kind(),
                "title": banner.title(),
                "detail": banner.detail(),
            })),
            None => Value::Nil,
        };

        let mut globals = liquid::object!({ "message": message });
        globals.insert("banner".into(), banner);

        self.template.render(&globals)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn banners_follow_the_outcome() {
        assert_eq!(Banner::from_outcome(&Ok(Label::Spam)), Banner::Spam);
        assert_eq!(Banner::from_outcome(&Ok(Label::Ham)), Banner::Ham);
        assert_eq!(
            Banner::from_outcome(&Err(InferenceError::EmptyInput)),
            Banner::EmptyInput
        );
        assert_eq!(
            Banner::from_outcome(&Err(InferenceError::ModelUnavailable)),
            Banner::ModelMissing
        );
        assert_eq!(
            Banner::EmptyInput.detail(),
            "Please enter a message to check."
        );
    }

    #[test]
    fn renders_without_a_result() {
        let html = Page::new().unwrap().render("", None).unwrap();

        assert!(html.contains("<form method=\"post\""));
        assert!(!html.contains("result-card spam"));
        assert!(!html.contains("id=\"result\""));
    }

    #[test]
    fn renders_the_result_and_escapes_input() {
        let html = Page::new()
            .unwrap()
            .render("<script>alert(1)</script>", Some(Banner::Spam))
            .unwrap();

        assert!(html.contains("result-card spam"));
        assert!(html.contains("SPAM DETECTED"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }
}
