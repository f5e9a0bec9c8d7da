//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Circulation status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
pub enum BookStatus {
    Available,
    Issued,
}

impl BookStatus {
    /// Status a book moves to when `transition` is applied, if allowed from `self`
    pub fn apply(self, transition: Transition) -> Option<BookStatus> {
        match (self, transition) {
            (BookStatus::Available, Transition::Issue) => Some(BookStatus::Issued),
            (BookStatus::Issued, Transition::Return) => Some(BookStatus::Available),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two state changes a book can undergo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Issue,
    Return,
}

impl Transition {
    /// Status the book must be in for the transition to apply
    pub fn from_status(self) -> BookStatus {
        match self {
            Transition::Issue => BookStatus::Available,
            Transition::Return => BookStatus::Issued,
        }
    }

    pub fn to_status(self) -> BookStatus {
        match self {
            Transition::Issue => BookStatus::Issued,
            Transition::Return => BookStatus::Available,
        }
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

/// Add book form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// Circulation counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub total: i64,
    pub issued: i64,
    pub available: i64,
}

impl CatalogSummary {
    pub fn new(total: i64, issued: i64) -> Self {
        Self {
            total,
            issued,
            available: total - issued,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_only_from_available() {
        assert_eq!(BookStatus::Available.apply(Transition::Issue), Some(BookStatus::Issued));
        assert_eq!(BookStatus::Issued.apply(Transition::Issue), None);
    }

    #[test]
    fn test_return_only_from_issued() {
        assert_eq!(BookStatus::Issued.apply(Transition::Return), Some(BookStatus::Available));
        assert_eq!(BookStatus::Available.apply(Transition::Return), None);
    }

    #[test]
    fn test_transition_endpoints_agree_with_apply() {
        for transition in [Transition::Issue, Transition::Return] {
            assert_eq!(
                transition.from_status().apply(transition),
                Some(transition.to_status())
            );
        }
    }

    #[test]
    fn test_summary_derives_available() {
        let summary = CatalogSummary::new(5, 2);
        assert_eq!(summary.available, 3);
        assert_eq!(summary.total, summary.issued + summary.available);
    }
}
