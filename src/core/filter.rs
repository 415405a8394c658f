use crate::core::ContentRecord;
use crate::domain::model::ALL_CATEGORIES;
use std::fmt;

/// Category selection for a listing. `All` places no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Exact, case-sensitive match. A record without a category never
    /// satisfies `Only`.
    pub fn admits(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category plus free-text constraint over a fetched collection.
///
/// Both constraints must hold. The text constraint is a case-insensitive
/// substring match against any of the record's searchable fields and is
/// skipped when the query is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub category: CategoryFilter,
    pub query: String,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category == CategoryFilter::All && self.query.is_empty()
    }

    pub fn matches<T: ContentRecord>(&self, record: &T) -> bool {
        self.matches_needle(record, self.needle().as_deref())
    }

    /// The records satisfying both constraints, in source order. The source
    /// is left untouched.
    pub fn apply<'a, T: ContentRecord>(&self, records: &'a [T]) -> Vec<&'a T> {
        let needle = self.needle();
        records
            .iter()
            .filter(|record| self.matches_needle(*record, needle.as_deref()))
            .collect()
    }

    /// Owned variant of [`ListFilter::apply`].
    pub fn apply_owned<T: ContentRecord>(&self, records: &[T]) -> Vec<T> {
        self.apply(records).into_iter().cloned().collect()
    }

    fn needle(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.to_lowercase())
        }
    }

    fn matches_needle<T: ContentRecord>(&self, record: &T, needle: Option<&str>) -> bool {
        if !self.category.admits(record.category()) {
            return false;
        }
        match needle {
            None => true,
            Some(needle) => record
                .searchable_text()
                .iter()
                .any(|text| text.to_lowercase().contains(needle)),
        }
    }
}
