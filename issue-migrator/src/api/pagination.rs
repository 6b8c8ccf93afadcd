//! Fetching every page of a listing endpoint.

use super::link::next_link;
use super::{ApiError, PageSource};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;

/// Fetches `start_url` and every page linked from it through `rel="next"`.
///
/// Items are returned in page order, then in the order each page lists them.
/// Any failing page fails the whole fetch and nothing fetched so far is
/// returned.
///
/// # Errors
///
/// Returns [`ApiError`] if a page request fails, a page body is not a JSON
/// array of `T`, or a `next` link points at a page that was already fetched.
pub async fn fetch_all<T, S>(source: &S, start_url: &str) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    S: PageSource,
{
    let mut items = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(start_url.to_string());

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            return Err(ApiError::PaginationLoop { url });
        }

        let page = source.get_page(&url).await?;
        let page_items: Vec<T> =
            serde_json::from_str(&page.body).map_err(|source| ApiError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!(url = %url, count = page_items.len(), "Fetched page");
        items.extend(page_items);

        next = page.link.as_deref().and_then(next_link);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawPage;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages and records the URLs requested.
    struct CannedPages {
        pages: HashMap<String, RawPage>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedPages {
        fn new(pages: Vec<(&str, &str, Option<&str>)>) -> Self {
            let pages = pages
                .into_iter()
                .map(|(url, body, link)| {
                    (
                        url.to_string(),
                        RawPage {
                            body: body.to_string(),
                            link: link.map(str::to_string),
                        },
                    )
                })
                .collect();
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageSource for CannedPages {
        async fn get_page(&self, url: &str) -> Result<RawPage, ApiError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| ApiError::Remote {
                method: "GET",
                url: url.to_string(),
                status: 404,
                message: "Not Found".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn concatenates_three_pages_in_order() {
        let source = CannedPages::new(vec![
            (
                "https://api/p1",
                "[1, 2]",
                Some("<https://api/p2>; rel=\"next\", <https://api/p3>; rel=\"last\""),
            ),
            (
                "https://api/p2",
                "[3, 4]",
                Some("<https://api/p1>; rel=\"prev\", <https://api/p3>; rel=\"next\""),
            ),
            ("https://api/p3", "[5]", Some("<https://api/p2>; rel=\"prev\"")),
        ]);

        let items: Vec<u32> = fetch_all(&source, "https://api/p1").await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *source.requested.lock().unwrap(),
            vec!["https://api/p1", "https://api/p2", "https://api/p3"]
        );
    }

    #[tokio::test]
    async fn single_page_without_link_header() {
        let source = CannedPages::new(vec![("https://api/only", "[7]", None)]);

        let items: Vec<u32> = fetch_all(&source, "https://api/only").await.unwrap();

        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn failing_page_fails_whole_fetch() {
        let source = CannedPages::new(vec![(
            "https://api/p1",
            "[1]",
            Some("<https://api/missing>; rel=\"next\""),
        )]);

        let result: Result<Vec<u32>, _> = fetch_all(&source, "https://api/p1").await;

        assert!(matches!(result, Err(ApiError::Remote { status: 404, .. })));
    }

    #[tokio::test]
    async fn rejects_non_array_body() {
        let source = CannedPages::new(vec![(
            "https://api/p1",
            r#"{"message": "Bad credentials"}"#,
            None,
        )]);

        let result: Result<Vec<u32>, _> = fetch_all(&source, "https://api/p1").await;

        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn detects_link_cycles() {
        let source = CannedPages::new(vec![
            ("https://api/p1", "[1]", Some("<https://api/p2>; rel=\"next\"")),
            ("https://api/p2", "[2]", Some("<https://api/p1>; rel=\"next\"")),
        ]);

        let result: Result<Vec<u32>, _> = fetch_all(&source, "https://api/p1").await;

        assert!(matches!(
            result,
            Err(ApiError::PaginationLoop { url }) if url == "https://api/p1"
        ));
    }
}
