use std::sync::Arc;

use shared::{domain::EmployeeId, error::FieldErrors};

use crate::{
    endpoint::{ResourceEndpoint, VisitRequest, VisitResponse},
    error::TransportError,
};

/// Identity of one mounted view. A fresh id is minted every time a page
/// payload replaces the current view, so answers addressed to an older id
/// are recognisably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub(crate) u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset(pub u32);

/// What the originating view expects to do with the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitIntent {
    Navigate,
    Submit,
    Delete(EmployeeId),
}

#[derive(Debug, Clone)]
pub struct PendingVisit {
    origin: ViewId,
    intent: VisitIntent,
    request: VisitRequest,
}

impl PendingVisit {
    pub(crate) fn new(origin: ViewId, intent: VisitIntent, request: VisitRequest) -> Self {
        Self {
            origin,
            intent,
            request,
        }
    }

    pub fn origin(&self) -> ViewId {
        self.origin
    }

    pub fn intent(&self) -> VisitIntent {
        self.intent
    }

    pub fn request(&self) -> &VisitRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct SettledVisit {
    pub(crate) origin: ViewId,
    pub(crate) intent: VisitIntent,
    pub(crate) request: VisitRequest,
    pub(crate) result: Result<VisitResponse, TransportError>,
}

impl SettledVisit {
    pub fn origin(&self) -> ViewId {
        self.origin
    }

    pub fn result(&self) -> &Result<VisitResponse, TransportError> {
        &self.result
    }
}

/// Performs the exchange for `pending`. Holds no session state, so callers
/// may run it on their event loop while the view keeps rendering.
pub async fn dispatch(endpoint: Arc<dyn ResourceEndpoint>, pending: PendingVisit) -> SettledVisit {
    let PendingVisit {
        origin,
        intent,
        request,
    } = pending;
    let result = endpoint.visit(request.clone()).await;
    SettledVisit {
        origin,
        intent,
        request,
        result,
    }
}

/// How a settled visit was reconciled into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// A new page replaced the current view.
    Navigated { url: String },
    /// The server rejected the submitted fields; the form now shows them.
    Rejected(FieldErrors),
    /// Nothing changed apart from the failure being surfaced.
    Failed { message: String },
    /// The originating view is gone; the answer was dropped.
    Stale,
}
