//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookStatus, CatalogSummary, Transition},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// All books, most recently created first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, status FROM books ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, status FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Insert a new book; new books always start out available
    pub async fn create(&self, title: &str, author: &str) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, status)
            VALUES (?, ?, ?)
            RETURNING id, title, author, status
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(BookStatus::Available)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Insert several books in one transaction, in the given order
    pub async fn create_many(&self, books: &[(&str, &str)]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        for (title, author) in books {
            sqlx::query("INSERT INTO books (title, author, status) VALUES (?, ?, ?)")
                .bind(*title)
                .bind(*author)
                .bind(BookStatus::Available)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Apply a status transition if the book is currently in the source state.
    ///
    /// The state check and the write happen in one statement, so concurrent
    /// callers cannot both observe the source state. Returns `true` when the
    /// status changed; a missing book or a book in the wrong state yields `false`.
    pub async fn transition(&self, id: i64, transition: Transition) -> AppResult<bool> {
        let result = sqlx::query("UPDATE books SET status = ? WHERE id = ? AND status = ?")
            .bind(transition.to_status())
            .bind(id)
            .bind(transition.from_status())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Total and issued counts
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let (total, issued): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = ? THEN 1 ELSE 0 END), 0) FROM books",
        )
        .bind(BookStatus::Issued)
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogSummary::new(total, issued))
    }

    pub async fn is_empty(&self) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }
}
