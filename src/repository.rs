//! Storage access for the `book` table.
//!
//! [`BookStore`] owns every SQL statement the service issues. Each call is a single
//! statement against the shared pool and is abandoned once the configured query
//! timeout elapses.

use std::{future::Future, time::Duration};

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    types::{Book, BookChanges, BookReference, NewBook, SortOrder},
};

const LIKE_ESCAPE: char = '!';

/// Escapes LIKE metacharacters so user input matches literally (`ESCAPE '!'`).
pub fn escape_like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

#[derive(Clone)]
pub struct BookStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl BookStore {
    pub fn new(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res.map_err(AppError::from),
            Err(_) => Err(AppError::storage(format!(
                "query exceeded timeout of {} ms",
                self.query_timeout.as_millis()
            ))),
        }
    }

    /// Single `SELECT 1` round trip, bounded like every other call.
    pub async fn ping(&self) -> AppResult<()> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool)).await.map(|_| ())
    }

    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.bounded(sqlx::query_as::<_, Book>("SELECT * FROM book").fetch_all(&self.pool)).await
    }

    pub async fn list_references(&self) -> AppResult<Vec<BookReference>> {
        self.bounded(
            sqlx::query_as::<_, BookReference>("SELECT reference, title, returned FROM book").fetch_all(&self.pool),
        )
        .await
    }

    /// Books whose title contains `fragment`; every book when no fragment is given.
    pub async fn title_contains(&self, fragment: Option<&str>) -> AppResult<Vec<Book>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM book");
        if let Some(fragment) = fragment {
            qb.push(" WHERE title LIKE ")
                .push_bind(format!("%{}%", escape_like_pattern(fragment)))
                .push(" ESCAPE '!'");
        }
        self.bounded(qb.build_query_as::<Book>().fetch_all(&self.pool)).await
    }

    /// Books whose title starts with `prefix`; every book when no prefix is given.
    pub async fn title_starting_with(&self, prefix: Option<&str>) -> AppResult<Vec<Book>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM book");
        if let Some(prefix) = prefix {
            qb.push(" WHERE title LIKE ")
                .push_bind(format!("{}%", escape_like_pattern(prefix)))
                .push(" ESCAPE '!'");
        }
        self.bounded(qb.build_query_as::<Book>().fetch_all(&self.pool)).await
    }

    /// Books borrowed strictly after `date` (compared as ISO-8601 text).
    pub async fn borrowed_after(&self, date: Option<&str>) -> AppResult<Vec<Book>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM book");
        if let Some(date) = date {
            qb.push(" WHERE borrowing_date > ").push_bind(date.to_string());
        }
        self.bounded(qb.build_query_as::<Book>().fetch_all(&self.pool)).await
    }

    pub async fn arranged_by_title(&self, order: SortOrder) -> AppResult<Vec<Book>> {
        let sql = format!("SELECT * FROM book ORDER BY title {}", order.as_sql());
        self.bounded(sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool)).await
    }

    /// First book whose title is exactly `title`.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        self.bounded(
            sqlx::query_as::<_, Book>("SELECT * FROM book WHERE title = ?1 LIMIT 1")
                .bind(title)
                .fetch_optional(&self.pool),
        )
        .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Book>> {
        self.bounded(
            sqlx::query_as::<_, Book>("SELECT * FROM book WHERE id = ?1").bind(id).fetch_optional(&self.pool),
        )
        .await
    }

    /// Inserts a book and returns its generated id.
    pub async fn create(&self, book: &NewBook) -> AppResult<i64> {
        let result = self
            .bounded(
                sqlx::query(
                    "INSERT INTO book (title, borrowing_date, reference, returned) VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(book.title.as_deref())
                .bind(book.borrowing_date)
                .bind(book.reference.as_deref())
                .bind(book.returned.unwrap_or(false))
                .execute(&self.pool),
            )
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrites the supplied columns of book `id`; returns the number of rows touched.
    ///
    /// A change set without any column has no valid statement and fails like any
    /// other rejected write.
    pub async fn update(&self, id: i64, changes: &BookChanges) -> AppResult<u64> {
        if changes.is_empty() {
            return Err(AppError::storage(format!("empty UPDATE for book {}", id)));
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE book SET ");
        {
            let mut sets = qb.separated(", ");
            if let Some(title) = &changes.title {
                sets.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(reference) = &changes.reference {
                sets.push("reference = ").push_bind_unseparated(reference.clone());
            }
            if let Some(date) = changes.borrowing_date {
                sets.push("borrowing_date = ").push_bind_unseparated(date);
            }
            if let Some(returned) = changes.returned {
                sets.push("returned = ").push_bind_unseparated(returned);
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = self.bounded(qb.build().execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    pub async fn toggle_returned(&self, id: i64) -> AppResult<u64> {
        let result = self
            .bounded(
                sqlx::query("UPDATE book SET returned = NOT returned WHERE id = ?1").bind(id).execute(&self.pool),
            )
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = self.bounded(sqlx::query("DELETE FROM book WHERE id = ?1").bind(id).execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }

    /// Removes every book still out on loan.
    pub async fn delete_not_returned(&self) -> AppResult<u64> {
        let result = self.bounded(sqlx::query("DELETE FROM book WHERE returned = 0").execute(&self.pool)).await?;
        Ok(result.rows_affected())
    }
}
