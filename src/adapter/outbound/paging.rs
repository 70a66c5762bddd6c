//! Cursor-driven pagination loop shared by the venue adapters.

use std::future::Future;

use crate::domain::Page;
use crate::error::{ProviderError, Result};

/// Fetch pages until the provider stops returning a continuation cursor.
///
/// `fetch` receives the cursor from the previous page (`None` for the first
/// request). Any page error aborts the whole drain; a partial page set is
/// never returned. A cursor that repeats is treated as a stalled provider.
pub async fn drain<T, F, Fut>(provider: &'static str, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch(cursor.clone()).await?;
        items.extend(page.items);

        match page.next {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                return Err(ProviderError::Pagination {
                    provider,
                    reason: format!("cursor '{next}' repeated"),
                }
                .into());
            }
            Some(next) => cursor = Some(next),
            None => return Ok(items),
        }
    }
}
