//! Book list and circulation endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
    AppState,
};

use super::{flash, CurrentUser};

/// Data for the book list page
#[derive(Serialize, ToSchema)]
pub struct BooksView {
    /// All books, newest first
    pub books: Vec<Book>,
    /// Messages from the previous request
    pub flashes: Vec<String>,
}

/// Book ids in URLs are non-negative integers; anything else is not a route
fn book_id_from_path(path: Result<Path<u32>, PathRejection>) -> AppResult<i64> {
    let Path(book_id) = path.map_err(|e| AppError::NotFound(e.body_text()))?;
    Ok(i64::from(book_id))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Book list", body = BooksView),
        (status = 303, description = "Not logged in, redirect to /")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<BooksView>)> {
    let books = state.services.catalog.list_books().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Json(BooksView { books, flashes })))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    security(("session_cookie" = [])),
    request_body(content = CreateBook, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /books; a flash message is set when the title is blank")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<CreateBook>,
) -> AppResult<Response> {
    match state.services.catalog.add_book(form).await {
        Ok(book) => {
            tracing::debug!("Book id={} added by '{}'", book.id, user);
            Ok(Redirect::to("/books").into_response())
        }
        Err(e @ AppError::Validation(_)) => {
            let jar = flash::push(jar, e.user_message());
            Ok((jar, Redirect::to("/books")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Issue an available book
#[utoipa::path(
    get,
    path = "/issue/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(
        ("id" = u32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Redirect to /books; unknown or already issued books are left unchanged"),
        (status = 404, description = "Id is not a non-negative integer")
    )
)]
pub async fn issue_book(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    book_id: Result<Path<u32>, PathRejection>,
) -> AppResult<Redirect> {
    let book_id = book_id_from_path(book_id)?;
    state.services.catalog.issue(book_id).await?;
    Ok(Redirect::to("/books"))
}

/// Return an issued book
#[utoipa::path(
    get,
    path = "/return/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(
        ("id" = u32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Redirect to /books; unknown or available books are left unchanged"),
        (status = 404, description = "Id is not a non-negative integer")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    book_id: Result<Path<u32>, PathRejection>,
) -> AppResult<Redirect> {
    let book_id = book_id_from_path(book_id)?;
    state.services.catalog.return_book(book_id).await?;
    Ok(Redirect::to("/books"))
}
