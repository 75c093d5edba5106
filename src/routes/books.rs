//! Handlers for the `/api` book surface.
//!
//! Reads answer with JSON, writes and failures with plain text.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{AppError, AppResult, OptionExt, LOOKUP_FAILED, SAVE_FAILED, UPDATE_FAILED},
    state::AppState,
    types::{
        supplied, ArrangeQuery, Book, BookChanges, BookReference, BorrowedAfterQuery, ContainsQuery, NewBook,
        SearchQuery, StartingQuery,
    },
};

const BOOK_NOT_FOUND: &str = "Book not found !";

/// 200 with the rows, or 404 with `message` when the filter matched nothing.
fn matched_or_not_found(state: &AppState, books: Vec<Book>, message: String) -> AppResult<Json<Vec<Book>>> {
    if books.is_empty() {
        state.metrics.inc_not_found();
        return Err(AppError::NotFound(message));
    }
    state.metrics.inc_listed();
    Ok(Json(books))
}

pub async fn welcome() -> impl IntoResponse {
    "Welcome to our library!"
}

pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.books.list_all().await?;
    state.metrics.inc_listed();
    Ok(Json(books))
}

pub async fn list_references(State(state): State<AppState>) -> AppResult<Json<Vec<BookReference>>> {
    let refs = state.books.list_references().await?;
    state.metrics.inc_listed();
    Ok(Json(refs))
}

pub async fn title_contains(
    State(state): State<AppState>,
    Query(query): Query<ContainsQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let fragment = supplied(&query.contains);
    let books = state.books.title_contains(fragment).await?;
    let message = format!("No book containing '{}' in its title...", fragment.unwrap_or_default());
    matched_or_not_found(&state, books, message)
}

pub async fn title_starting(
    State(state): State<AppState>,
    Query(query): Query<StartingQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let prefix = supplied(&query.prefix);
    let books = state.books.title_starting_with(prefix).await?;
    let message = format!("No book starting with '{}' in its title...", prefix.unwrap_or_default());
    matched_or_not_found(&state, books, message)
}

pub async fn borrowed_after(
    State(state): State<AppState>,
    Query(query): Query<BorrowedAfterQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let date = supplied(&query.greater_than);
    let books = state.books.borrowed_after(date).await?;
    let message = format!("No book beyond '{}'...", date.unwrap_or_default());
    matched_or_not_found(&state, books, message)
}

/// Sorted by title; an empty table yields `[]`.
pub async fn arrange(State(state): State<AppState>, Query(query): Query<ArrangeQuery>) -> AppResult<Json<Vec<Book>>> {
    let books = state.books.arranged_by_title(query.sort_order()).await?;
    state.metrics.inc_listed();
    Ok(Json(books))
}

pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> AppResult<Json<Book>> {
    let title = supplied(&query.title);
    let found = match title {
        Some(title) => state.books.find_by_title(title).await?,
        None => None,
    };
    let Some(book) = found else {
        state.metrics.inc_not_found();
        return Err(AppError::NotFound(format!("No book untitled {}", title.unwrap_or_default())));
    };
    state.metrics.inc_listed();
    Ok(Json(book))
}

/// An id that is not an integer cannot name a row, so it answers like a missing book.
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Book>> {
    let found = match id {
        Ok(Path(id)) => state.books.get(id).await.map_err(|e| e.publicly(LOOKUP_FAILED))?,
        Err(rejection) => {
            tracing::debug!("Unusable book id: {}", rejection.body_text());
            None
        }
    };
    match found.ok_or_not_found(BOOK_NOT_FOUND) {
        Ok(book) => {
            state.metrics.inc_listed();
            Ok(Json(book))
        }
        Err(e) => {
            state.metrics.inc_not_found();
            Err(e)
        }
    }
}

/// Inserts the book; the new row is announced in the `Location` header.
pub async fn create_book(State(state): State<AppState>, Json(book): Json<NewBook>) -> AppResult<impl IntoResponse> {
    let id = state.books.create(&book).await.map_err(|e| e.publicly(SAVE_FAILED))?;
    state.metrics.inc_created();
    tracing::info!(id, "Book saved");
    Ok((StatusCode::OK, [(header::LOCATION, format!("/api/book/{}", id))], "Book successfully saved !"))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<BookChanges>,
) -> AppResult<&'static str> {
    let rows = state.books.update(id, &changes).await.map_err(|e| e.publicly(UPDATE_FAILED))?;
    tracing::debug!(id, rows, "Book updated");
    if rows > 0 {
        state.metrics.inc_updated();
    }
    Ok("Book successfully updated !")
}

pub async fn toggle_returned(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<&'static str> {
    let rows = state.books.toggle_returned(id).await.map_err(|e| e.publicly(UPDATE_FAILED))?;
    tracing::debug!(id, rows, "Book return status toggled");
    if rows > 0 {
        state.metrics.inc_toggled();
    }
    Ok("Book's return status has been successfully updated !")
}

/// Like update and toggle, deleting an unknown id still succeeds.
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<&'static str> {
    let rows = state.books.delete(id).await.map_err(|e| e.publicly(UPDATE_FAILED))?;
    state.metrics.add_deleted(rows);
    Ok("Book successfully deleted !")
}

pub async fn delete_not_returned(State(state): State<AppState>) -> AppResult<&'static str> {
    let rows = state.books.delete_not_returned().await.map_err(|e| e.publicly(UPDATE_FAILED))?;
    state.metrics.add_deleted(rows);
    tracing::info!(rows, "Deleted books not returned");
    Ok("Books not-returned successfully deleted !")
}
