use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::api::ApiError;
use crate::ui::prelude::*;

/// Collection state for a list screen: the fetched rows plus a loading
/// flag. Reload is single-attempt; a failed fetch keeps whatever was
/// already loaded so the screen stays usable.
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run one fetch attempt. On success the items are replaced; on
    /// failure the error is logged and the previous items stay in place.
    /// No retry and no backoff; callers trigger reloads explicitly after
    /// successful mutations.
    pub async fn reload<Fut>(&mut self, code: &str, fetch: Fut)
    where
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        self.loading = true;
        let result = fetch.await;
        self.loading = false;

        match result {
            Ok(items) => self.items = items,
            Err(err) => emit(
                Level::Warn,
                code,
                &format!("Failed to load list: {}", err.notification()),
                None,
            ),
        }
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Spinner shown while a list fetch is in flight.
pub fn loading_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_reload_replaces_items() {
        let mut list = ListState::new();
        list.items = vec![1, 2];
        list.reload("test.reload", async { Ok(vec![3, 4, 5]) }).await;
        assert_eq!(list.items, vec![3, 4, 5]);
        assert!(!list.loading);
    }

    #[tokio::test]
    async fn failed_reload_keeps_prior_items() {
        let mut list = ListState::new();
        list.items = vec![1, 2];
        list.reload("test.reload", async {
            Err(ApiError::Network("connection refused".into()))
        })
        .await;
        assert_eq!(list.items, vec![1, 2]);
        assert!(!list.loading);
    }

}
