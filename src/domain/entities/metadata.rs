//! Page metadata attached to a record at creation time.

/// Placeholder stored when no title could be determined.
pub const NO_TITLE: &str = "No title found";

/// Placeholder stored when no description could be determined.
pub const NO_DESCRIPTION: &str = "No description found";

/// Title and description of a target page.
///
/// Either field may be missing; [`PageMetadata::or_placeholders`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    pub fn new(title: Option<String>, description: Option<String>) -> Self {
        Self { title, description }
    }

    /// Metadata made entirely of placeholders.
    pub fn placeholder() -> Self {
        Self {
            title: Some(NO_TITLE.to_string()),
            description: Some(NO_DESCRIPTION.to_string()),
        }
    }

    /// Returns true if both fields are present.
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some()
    }

    /// Fills missing fields from `fallback`, keeping the ones already set.
    pub fn merge(self, fallback: PageMetadata) -> Self {
        Self {
            title: self.title.or(fallback.title),
            description: self.description.or(fallback.description),
        }
    }

    /// Replaces missing fields with the placeholder strings.
    pub fn or_placeholders(self) -> Self {
        self.merge(Self::placeholder())
    }
}
