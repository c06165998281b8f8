//! Client-side synchronisation layer for the employee roster: page
//! transitions against the employee resource, the views that render each
//! page, and the form state that feeds create and update requests.

use std::sync::Arc;

pub mod config;
pub mod detail_view;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod list_view;
pub mod render;
pub mod session;
pub mod transition;

pub use config::{load_settings, ClientSettings};
pub use detail_view::{DetailRender, DetailView};
pub use endpoint::{HttpEndpoint, ResourceEndpoint, VisitMethod, VisitRequest, VisitResponse};
pub use error::{SessionError, TransportError};
pub use form::{FormController, FormMode, FormRender};
pub use list_view::{ConfirmationPrompt, ListBody, ListRender, ListView, RowDeleteState};
pub use session::{Session, View};
pub use transition::{dispatch, PendingVisit, ScrollOffset, SettledVisit, Settlement, ViewId};

/// Opens a session on `path` against the server named in `settings`.
pub async fn connect(settings: &ClientSettings, path: &str) -> Result<Session, SessionError> {
    let endpoint: Arc<dyn ResourceEndpoint> = Arc::new(HttpEndpoint::new(settings)?);
    Session::open(endpoint, path, settings.display_offset()).await
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
