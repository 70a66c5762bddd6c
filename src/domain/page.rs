//! Paginated provider responses.

/// One page of results plus the cursor for the next page, if any.
///
/// Exhaustion is signalled by `next` being `None`, never by an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Continuation cursor for the following page.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// A page with a continuation cursor.
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }

    /// The final page.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// Whether another page follows this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}
