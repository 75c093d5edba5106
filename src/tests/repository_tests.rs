#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use crate::error::AppError;
    use crate::repository::{escape_like_pattern, BookStore};
    use crate::tests::memory_pool;
    use crate::types::{BookChanges, NewBook, SortOrder};

    async fn setup_store() -> BookStore {
        BookStore::new(memory_pool().await, Duration::from_secs(5))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_book(title: &str, reference: &str, borrowed: &str, returned: bool) -> NewBook {
        NewBook {
            title: Some(title.to_string()),
            reference: Some(reference.to_string()),
            borrowing_date: Some(date(borrowed)),
            returned: Some(returned),
        }
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("50%_off!"), "50!%!_off!!");
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = setup_store().await;
        let id = store.create(&new_book("Dune", "SF-001", "2024-01-01", false)).await.unwrap();

        let book = store.get(id).await.unwrap().unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.reference, "SF-001");
        assert_eq!(book.borrowing_date, date("2024-01-01"));
        assert!(!book.returned);

        assert!(store.get(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = setup_store().await;
        let a = store.create(&new_book("A", "R-1", "2024-01-01", false)).await.unwrap();
        let b = store.create(&new_book("A", "R-1", "2024-01-01", false)).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_with_missing_title_fails() {
        let store = setup_store().await;
        let book = NewBook { title: None, ..new_book("x", "R-1", "2024-01-01", false) };
        let err = store.create(&book).await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_filters_without_value_return_everything() {
        let store = setup_store().await;
        store.create(&new_book("Dune", "SF-001", "2024-01-01", false)).await.unwrap();
        store.create(&new_book("Emma", "CL-003", "2022-06-30", true)).await.unwrap();

        assert_eq!(store.title_contains(None).await.unwrap().len(), 2);
        assert_eq!(store.title_starting_with(None).await.unwrap().len(), 2);
        assert_eq!(store.borrowed_after(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_title_filters() {
        let store = setup_store().await;
        store.create(&new_book("The Hobbit", "F-001", "2024-01-01", false)).await.unwrap();
        store.create(&new_book("Hobbit Tales", "F-002", "2024-01-02", false)).await.unwrap();

        assert_eq!(store.title_contains(Some("Hobbit")).await.unwrap().len(), 2);
        let starting = store.title_starting_with(Some("Hobbit")).await.unwrap();
        assert_eq!(starting.len(), 1);
        assert_eq!(starting[0].title, "Hobbit Tales");
    }

    #[tokio::test]
    async fn test_arranged_by_title() {
        let store = setup_store().await;
        for title in ["Moby Dick", "Beloved", "Ulysses"] {
            store.create(&new_book(title, "R", "2024-01-01", false)).await.unwrap();
        }
        let asc: Vec<String> =
            store.arranged_by_title(SortOrder::Asc).await.unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(asc, vec!["Beloved", "Moby Dick", "Ulysses"]);
        let desc: Vec<String> =
            store.arranged_by_title(SortOrder::Desc).await.unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(desc, vec!["Ulysses", "Moby Dick", "Beloved"]);
    }

    #[tokio::test]
    async fn test_find_by_title_returns_first_match() {
        let store = setup_store().await;
        let first = store.create(&new_book("Dune", "SF-001", "2024-01-01", false)).await.unwrap();
        store.create(&new_book("Dune", "SF-002", "2024-01-05", false)).await.unwrap();

        let found = store.find_by_title("Dune").await.unwrap().unwrap();
        assert_eq!(found.id, first);
        assert!(store.find_by_title("dune messiah").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_only_touches_supplied_fields() {
        let store = setup_store().await;
        let id = store.create(&new_book("Dune", "SF-001", "2024-01-01", false)).await.unwrap();

        let changes = BookChanges { borrowing_date: Some(date("2024-04-01")), returned: Some(true), ..Default::default() };
        assert_eq!(store.update(id, &changes).await.unwrap(), 1);

        let book = store.get(id).await.unwrap().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.reference, "SF-001");
        assert_eq!(book.borrowing_date, date("2024-04-01"));
        assert!(book.returned);

        assert_eq!(store.update(id + 100, &changes).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let store = setup_store().await;
        let err = store.update(1, &BookChanges::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_query_timeout_becomes_storage_error() {
        let pool = memory_pool().await;
        // Hold the only connection so the next statement waits on the pool
        let _held = pool.acquire().await.unwrap();
        let store = BookStore::new(pool.clone(), Duration::from_millis(1));

        match store.list_all().await {
            Err(AppError::Storage { detail, .. }) => assert!(detail.contains("query exceeded timeout of 1 ms")),
            other => panic!("unexpected: {:?}", other.map(|books| books.len())),
        }
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_ping() {
        let store = setup_store().await;
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_toggle_and_deletes() {
        let store = setup_store().await;
        let out = store.create(&new_book("Out", "R-1", "2024-01-01", false)).await.unwrap();
        let back = store.create(&new_book("Back", "R-2", "2024-01-01", true)).await.unwrap();

        assert_eq!(store.toggle_returned(out).await.unwrap(), 1);
        assert!(store.get(out).await.unwrap().unwrap().returned);
        assert_eq!(store.toggle_returned(out).await.unwrap(), 1);
        assert!(!store.get(out).await.unwrap().unwrap().returned);

        assert_eq!(store.delete_not_returned().await.unwrap(), 1);
        assert!(store.get(out).await.unwrap().is_none());

        assert_eq!(store.delete(back).await.unwrap(), 1);
        assert_eq!(store.delete(back).await.unwrap(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
