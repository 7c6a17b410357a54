// pagegrab - page media grab components
//
// A set of independent browser-extension style components. The host calls a
// component's collector against the current page, then runs the collected
// data; the component answers with an action descriptor (download, convert,
// delegate) that the host executes.

pub mod classify;
pub mod cobalt;
pub mod components;
pub mod errors;
pub mod fetch;
pub mod format_select;
pub mod models;
pub mod player_response;
pub mod thumbnails;

pub use components::{all_components, MediaComponent};
pub use errors::GrabError;
pub use models::{
    ActionKind, ActionResult, Candidate, CollectedData, DownloadAction, MediaKind, PageContext,
    Platform,
};

/// Convenience wrapper for the host's two-step contract
pub async fn collect_then_run(
    component: &dyn MediaComponent,
    page: &PageContext,
) -> ActionResult {
    let data = component.collect(page);
    component.run(Some(&data)).await
}
