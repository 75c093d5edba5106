use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A library loan record, one row of the `book` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub reference: String,
    pub borrowing_date: NaiveDate,
    pub returned: bool,
}

/// Projection served by `GET /api/reference`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookReference {
    pub reference: String,
    pub title: String,
    pub returned: bool,
}

/// Body of `POST /api`.
///
/// Text and date fields stay optional here: a missing one is bound as NULL and the
/// table's NOT NULL constraint rejects the insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
    pub reference: Option<String>,
    pub borrowing_date: Option<NaiveDate>,
    /// Stored as `false` when absent.
    pub returned: Option<bool>,
}

/// Body of `PUT /api/{id}`: the columns a client may overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookChanges {
    pub title: Option<String>,
    pub reference: Option<String>,
    pub borrowing_date: Option<NaiveDate>,
    pub returned: Option<bool>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.reference.is_none() && self.borrowing_date.is_none() && self.returned.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// Query strings. Empty values count as absent.

#[derive(Debug, Default, Deserialize)]
pub struct ContainsQuery {
    pub contains: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartingQuery {
    #[serde(rename = "with")]
    pub prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BorrowedAfterQuery {
    #[serde(rename = "greaterThan")]
    pub greater_than: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArrangeQuery {
    pub order: Option<String>,
}

impl ArrangeQuery {
    /// Any non-empty `order` value sorts descending.
    pub fn sort_order(&self) -> SortOrder {
        if supplied(&self.order).is_some() {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

/// Returns the parameter value unless it is missing or empty.
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
