//! Declarative saved-search criteria.

use serde::{Deserialize, Serialize};

/// Abstract status restriction of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Only open (or reopened) issues.
    Open,
    /// Only closed issues.
    Closed,
    /// No restriction.
    Any,
}

impl StatusFilter {
    /// Parses the abstract status values accepted in saved queries.
    ///
    /// Returns `None` for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" | "opened" | "reopened" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "all" | "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Issue field a text criterion inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// Issue title.
    Title,
    /// Issue description.
    Description,
    /// Either the title or the description.
    TitleOrDescription,
    /// Assignee username.
    Assignee,
    /// Author username.
    Author,
    /// Milestone title.
    Milestone,
}

/// How a text criterion compares its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Case-sensitive whole-value equality.
    Exact,
}

/// One condition of a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    /// Restricts the issue state.
    Status {
        /// Accepted status.
        status: StatusFilter,
    },
    /// Matches text against an issue field.
    Text {
        /// Field to inspect.
        field: TextField,
        /// Pattern to look for.
        pattern: String,
        /// Comparison mode.
        mode: TextMatch,
    },
    /// Requires the issue to carry a label (case-insensitive).
    Label {
        /// Label name.
        name: String,
    },
    /// A criterion the filter does not evaluate; always passes.
    Unsupported {
        /// Attribute key as supplied by the caller.
        key: String,
        /// Attribute value as supplied by the caller.
        value: String,
    },
}

impl Criterion {
    /// Creates a status criterion.
    #[must_use]
    pub const fn status(status: StatusFilter) -> Self {
        Self::Status { status }
    }

    /// Creates a case-insensitive substring criterion.
    #[must_use]
    pub fn contains(field: TextField, pattern: impl Into<String>) -> Self {
        Self::Text {
            field,
            pattern: pattern.into(),
            mode: TextMatch::Contains,
        }
    }

    /// Creates an exact-match criterion.
    #[must_use]
    pub fn exact(field: TextField, pattern: impl Into<String>) -> Self {
        Self::Text {
            field,
            pattern: pattern.into(),
            mode: TextMatch::Exact,
        }
    }

    /// Creates a label criterion.
    #[must_use]
    pub fn label(name: impl Into<String>) -> Self {
        Self::Label { name: name.into() }
    }
}

/// Attribute key switching text criteria to exact matching.
const MATCH_KEY: &str = "match";

/// Ordered, immutable set of criteria.
///
/// All criteria must pass for an issue to match; an empty query matches
/// every issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    criteria: Vec<Criterion>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// Appends a criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Builds a query from the caller's structured key/value attributes.
    ///
    /// Recognised keys are `status`, `text`, `title`, `description`,
    /// `assignee`, `author`, `label` and `milestone`. `match=exact` turns every
    /// text criterion into an exact match. Blank values are skipped; unknown
    /// keys and unknown status values are kept as
    /// [`Criterion::Unsupported`].
    #[must_use]
    pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(String, String)> = attributes
            .into_iter()
            .map(|(key, value)| {
                (
                    key.as_ref().trim().to_ascii_lowercase(),
                    value.as_ref().trim().to_owned(),
                )
            })
            .filter(|(_, value)| !value.is_empty())
            .collect();

        let mode = if pairs
            .iter()
            .any(|(key, value)| key == MATCH_KEY && value.eq_ignore_ascii_case("exact"))
        {
            TextMatch::Exact
        } else {
            TextMatch::Contains
        };

        let criteria = pairs
            .into_iter()
            .filter(|(key, _)| key != MATCH_KEY)
            .map(|(key, value)| criterion_from_attribute(&key, &value, mode))
            .collect();
        Self { criteria }
    }

    /// Returns the criteria in declaration order.
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns `true` when the query carries no criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

fn criterion_from_attribute(key: &str, value: &str, mode: TextMatch) -> Criterion {
    let text = |field| Criterion::Text {
        field,
        pattern: value.to_owned(),
        mode,
    };
    match key {
        "status" => {
            StatusFilter::parse(value).map_or_else(|| unsupported(key, value), Criterion::status)
        }
        "text" => text(TextField::TitleOrDescription),
        "title" => text(TextField::Title),
        "description" => text(TextField::Description),
        "assignee" => text(TextField::Assignee),
        "author" => text(TextField::Author),
        "milestone" => text(TextField::Milestone),
        "label" => Criterion::label(value),
        _ => unsupported(key, value),
    }
}

fn unsupported(key: &str, value: &str) -> Criterion {
    Criterion::Unsupported {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}
