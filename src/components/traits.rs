// MediaComponent trait - the {collect, run} capability every component exposes

use async_trait::async_trait;

use crate::errors::GrabError;
use crate::models::{ActionResult, CollectedData, PageContext};

/// One self-contained page-media component.
///
/// The host calls `collect` synchronously against the current page, shows the
/// result to the user, and later calls `run` with the data it got back. The
/// two calls share nothing except that data object.
#[async_trait]
pub trait MediaComponent: Send + Sync {
    /// Name of the component (for logging)
    fn name(&self) -> &'static str;

    /// Classify the current page. Classification errors land in the returned
    /// record's `error` field, never as a panic.
    fn collect(&self, page: &PageContext) -> CollectedData;

    /// Perform the action for previously collected data. Missing or errored
    /// data yields `{success: false}` - the host has no exception wrapper.
    async fn run(&self, data: Option<&CollectedData>) -> ActionResult;
}

/// Shared runner guard: reject absent or errored collected data up front
pub fn require_collected(data: Option<&CollectedData>) -> Result<&CollectedData, ActionResult> {
    match data {
        None => Err(ActionResult::failure(GrabError::MissingCollectedData)),
        Some(d) if d.is_errored() => {
            // Surface the collector's terminal error verbatim
            let message = d
                .error
                .clone()
                .unwrap_or_else(|| GrabError::MissingCollectedData.to_string());
            Err(ActionResult::failure_text(message))
        }
        Some(d) => Ok(d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    #[test]
    fn test_absent_data_is_rejected() {
        let result = require_collected(None).unwrap_err();
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_errored_data_is_rejected_with_collector_message() {
        let data = CollectedData::failed(
            "https://www.netflix.com/watch/1",
            GrabError::DrmProtected("netflix.com".to_string()),
        );
        let result = require_collected(Some(&data)).unwrap_err();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("netflix.com"));
    }

    #[test]
    fn test_clean_data_passes() {
        let data = CollectedData::new(Platform::Youtube, "https://youtu.be/dQw4w9WgXcQ");
        assert!(require_collected(Some(&data)).is_ok());
    }
}
