//! Cursor-based pagination
//!
//! A page is every row with `id >= cursor`, ascending by id, at most
//! [`PAGE_SIZE`] long. The store is asked for one row more than a page; when
//! that lookahead row comes back its id becomes the next cursor and the row is
//! dropped from the page.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::repository::{PageCursor, ResourceList, PAGE_SIZE};
//!
//! let cursor = PageCursor::new(-4);
//! assert_eq!(cursor.get(), 0);
//!
//! let page: ResourceList<i64> = ResourceList::from_lookahead((1..=11).collect(), |id| *id, PAGE_SIZE);
//! assert_eq!(page.items.len(), 10);
//! assert_eq!(page.next_page_id, Some(11));
//! ```

use serde::Serialize;
use std::fmt;

use super::error::StoreOperation;
use super::traits::{Store, StoreResult};
use crate::resource::Resource;

/// Maximum number of items in one page
pub const PAGE_SIZE: usize = 10;

/// Lower bound (inclusive) of the ids returned by a list request
///
/// Always non-negative. The default cursor 0 starts at the earliest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageCursor(i64);

impl PageCursor {
    /// Build a cursor, clamping negative values to 0
    ///
    /// Ids start at 1, so a negative lower bound selects the same rows as 0.
    pub fn new(value: i64) -> Self {
        Self(value.max(0))
    }

    /// The cursor value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PageCursor {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceList<T> {
    /// Items of this page, ascending by id
    pub items: Vec<T>,
    /// Cursor of the next page, absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_id: Option<i64>,
}

impl<T> ResourceList<T> {
    /// Cut a lookahead query result down to one page
    ///
    /// `rows` must be ascending by id and hold at most `page_size + 1` entries.
    /// Only the lookahead row sets `next_page_id`; a page filled exactly to
    /// `page_size` is the last one.
    pub fn from_lookahead(mut rows: Vec<T>, id_of: impl Fn(&T) -> i64, page_size: usize) -> Self {
        let next_page_id = rows.get(page_size).map(&id_of);
        rows.truncate(page_size);
        Self {
            items: rows,
            next_page_id,
        }
    }

    /// Whether more pages follow this one
    pub fn has_next(&self) -> bool {
        self.next_page_id.is_some()
    }
}

/// Fetch the page starting at `cursor`
pub async fn paginate<R, S>(store: &S, cursor: PageCursor) -> StoreResult<ResourceList<R>>
where
    R: Resource,
    S: Store<R>,
{
    let rows = store
        .list_from(cursor.get(), PAGE_SIZE as i64 + 1)
        .await
        .map_err(|e| e.with_operation(StoreOperation::List))?;

    let page = ResourceList::from_lookahead(rows, R::id, PAGE_SIZE);

    tracing::debug!(
        kind = R::KIND,
        page_id = cursor.get(),
        items = page.items.len(),
        next_page_id = ?page.next_page_id,
        "Listed page"
    );

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use crate::resource::Article;

    async fn store_with(count: usize) -> MemoryStore<Article> {
        let store = MemoryStore::new();
        for i in 0..count {
            store
                .insert(&Article::new(format!("article {i}"), 1.0))
                .await
                .unwrap();
        }
        store
    }

    fn ids(page: &ResourceList<Article>) -> Vec<i64> {
        page.items.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_cursor_clamps_negative() {
        assert_eq!(PageCursor::new(-1).get(), 0);
        assert_eq!(PageCursor::new(i64::MIN).get(), 0);
        assert_eq!(PageCursor::new(42).get(), 42);
        assert_eq!(PageCursor::default().get(), 0);
    }

    #[test]
    fn test_from_lookahead_short_page() {
        let page = ResourceList::from_lookahead(vec![1, 2, 3], |id| *id, 10);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.next_page_id, None);
    }

    #[test]
    fn test_from_lookahead_exactly_full_page() {
        let rows: Vec<i64> = (1..=10).collect();
        let page = ResourceList::from_lookahead(rows, |id| *id, 10);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next());
    }

    #[test]
    fn test_from_lookahead_drops_lookahead_row() {
        let rows: Vec<i64> = (5..=15).collect();
        let page = ResourceList::from_lookahead(rows, |id| *id, 10);
        assert_eq!(page.items, (5..=14).collect::<Vec<_>>());
        assert_eq!(page.next_page_id, Some(15));
    }

    #[test]
    fn test_serialization_omits_missing_cursor() {
        let page = ResourceList::from_lookahead(vec![Article::new("Skittles", 1.99)], |a| a.id, 10);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("next_page_id").is_none());
        assert!(json["items"].is_array());

        let page = ResourceList {
            items: Vec::<Article>::new(),
            next_page_id: Some(11),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["next_page_id"], 11);
    }

    #[tokio::test]
    async fn test_first_page_with_lookahead() {
        let store = store_with(12).await;

        let page = paginate(&store, PageCursor::default()).await.unwrap();
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
        assert_eq!(page.next_page_id, Some(11));

        let page = paginate(&store, PageCursor::new(11)).await.unwrap();
        assert_eq!(ids(&page), vec![11, 12]);
        assert_eq!(page.next_page_id, None);
    }

    #[tokio::test]
    async fn test_cursor_is_inclusive() {
        let store = store_with(2).await;
        let page = paginate(&store, PageCursor::new(1)).await.unwrap();
        assert_eq!(ids(&page), vec![1, 2]);

        let page = paginate(&store, PageCursor::new(2)).await.unwrap();
        assert_eq!(ids(&page), vec![2]);
    }

    #[tokio::test]
    async fn test_cursor_beyond_last_id() {
        let store = store_with(3).await;
        let page = paginate(&store, PageCursor::new(100)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_id, None);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::<Article>::new();
        let page = paginate(&store, PageCursor::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_following_cursors_visits_every_row_once() {
        let store = store_with(35).await;
        let mut seen = Vec::new();
        let mut cursor = PageCursor::new(4);

        loop {
            let page = paginate(&store, cursor).await.unwrap();
            assert!(page.items.len() <= PAGE_SIZE);
            seen.extend(ids(&page));
            match page.next_page_id {
                Some(next) => cursor = PageCursor::new(next),
                None => break,
            }
        }

        assert_eq!(seen, (4..=35).collect::<Vec<_>>());
    }
}
