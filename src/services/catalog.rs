//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CatalogSummary, CreateBook, Transition},
    repository::Repository,
};

/// Books inserted into an empty catalog on first start
pub const SEED_BOOKS: [(&str, &str); 3] = [
    ("Introduction to Java", "K. Thomas"),
    ("Data Structures", "S. Yadav"),
    ("Operating Systems", "A. Tanenbaum"),
];

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, newest first
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Add a book to the catalog. The title is required; both fields are trimmed.
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        let title = book.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }

        let book = self.repository.books.create(title, book.author.trim()).await?;
        tracing::info!("Added book id={} '{}'", book.id, book.title);
        Ok(book)
    }

    /// Issue an available book. Returns `false` when nothing changed.
    pub async fn issue(&self, book_id: i64) -> AppResult<bool> {
        self.apply(book_id, Transition::Issue).await
    }

    /// Return an issued book. Returns `false` when nothing changed.
    pub async fn return_book(&self, book_id: i64) -> AppResult<bool> {
        self.apply(book_id, Transition::Return).await
    }

    pub async fn count_summary(&self) -> AppResult<CatalogSummary> {
        self.repository.books.summary().await
    }

    /// Insert the sample books if the catalog is empty
    pub async fn seed(&self) -> AppResult<bool> {
        if !self.repository.books.is_empty().await? {
            return Ok(false);
        }
        self.repository.books.create_many(&SEED_BOOKS).await?;
        tracing::info!("Seeded catalog with {} books", SEED_BOOKS.len());
        Ok(true)
    }

    async fn apply(&self, book_id: i64, transition: Transition) -> AppResult<bool> {
        let changed = self.repository.books.transition(book_id, transition).await?;
        if changed {
            tracing::info!(
                "Book id={} {:?}: {} -> {}",
                book_id,
                transition,
                transition.from_status(),
                transition.to_status()
            );
        } else {
            tracing::debug!("Book id={} {:?} ignored", book_id, transition);
        }
        Ok(changed)
    }
}
