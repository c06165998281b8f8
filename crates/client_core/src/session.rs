use std::sync::Arc;

use chrono::FixedOffset;
use shared::{domain::EmployeeId, protocol::Page};
use tracing::{debug, info, warn};

use crate::{
    detail_view::DetailView,
    endpoint::{ResourceEndpoint, VisitRequest, VisitResponse},
    error::{SessionError, TransportError},
    form::FormController,
    list_view::{ConfirmationPrompt, ListView},
    transition::{
        dispatch, PendingVisit, ScrollOffset, SettledVisit, Settlement, ViewId, VisitIntent,
    },
};

const REJECTED_MESSAGE: &str = "The request was rejected.";

/// The view currently mounted in the session.
#[derive(Debug, Clone)]
pub enum View {
    List(ListView),
    Detail(DetailView),
    Form(FormController),
}

impl View {
    fn from_page(page: Page, display_offset: FixedOffset) -> Self {
        match page {
            Page::Index { props, .. } => View::List(ListView::new(props, display_offset)),
            Page::Show { props, .. } => View::Detail(DetailView::new(props, display_offset)),
            Page::Create { props, .. } => {
                View::Form(FormController::create(props.flash).with_errors(props.errors))
            }
            Page::Edit { props, .. } => View::Form(
                FormController::edit(props.employee, props.flash).with_errors(props.errors),
            ),
        }
    }
}

/// One browser-tab equivalent: a single current view, replaced whole by
/// every page the server sends back.
pub struct Session {
    endpoint: Arc<dyn ResourceEndpoint>,
    view: View,
    view_id: ViewId,
    url: String,
    scroll: ScrollOffset,
    display_offset: FixedOffset,
}

impl Session {
    /// Loads the page at `path` and mounts it.
    pub async fn open(
        endpoint: Arc<dyn ResourceEndpoint>,
        path: &str,
        display_offset: FixedOffset,
    ) -> Result<Self, SessionError> {
        let page = match endpoint.visit(VisitRequest::get(path)).await? {
            VisitResponse::Page(page) => page,
            VisitResponse::Invalid(_) => return Err(SessionError::UnexpectedRejection),
        };
        info!(url = page.url(), component = page.component(), "session opened");
        Ok(Self::with_page(endpoint, page, display_offset))
    }

    /// Mounts a page already in hand.
    pub fn with_page(
        endpoint: Arc<dyn ResourceEndpoint>,
        page: Page,
        display_offset: FixedOffset,
    ) -> Self {
        let url = page.url().to_string();
        Self {
            endpoint,
            view: View::from_page(page, display_offset),
            view_id: ViewId(0),
            url,
            scroll: ScrollOffset::default(),
            display_offset,
        }
    }

    pub fn endpoint(&self) -> Arc<dyn ResourceEndpoint> {
        Arc::clone(&self.endpoint)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    pub fn list(&self) -> Option<&ListView> {
        match &self.view {
            View::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&FormController> {
        match &self.view {
            View::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Result<&mut FormController, SessionError> {
        match &mut self.view {
            View::Form(form) => Ok(form),
            _ => Err(SessionError::NoActiveForm),
        }
    }

    pub fn detail(&self) -> Option<&DetailView> {
        match &self.view {
            View::Detail(detail) => Some(detail),
            _ => None,
        }
    }

    fn list_mut(&mut self) -> Result<&mut ListView, SessionError> {
        match &mut self.view {
            View::List(list) => Ok(list),
            _ => Err(SessionError::NotAListView),
        }
    }

    pub fn begin_visit(&self, request: VisitRequest) -> PendingVisit {
        PendingVisit::new(self.view_id, VisitIntent::Navigate, request)
    }

    /// Starts a form submission; `Ok(None)` while one is in flight.
    pub fn begin_submit(&mut self) -> Result<Option<PendingVisit>, SessionError> {
        let view_id = self.view_id;
        let request = self.form_mut()?.begin_submit();
        Ok(request.map(|request| PendingVisit::new(view_id, VisitIntent::Submit, request)))
    }

    pub fn request_delete(
        &mut self,
        id: EmployeeId,
    ) -> Result<Option<ConfirmationPrompt>, SessionError> {
        self.list_mut()?.request_delete(id)
    }

    pub fn decline_delete(&mut self) -> Result<(), SessionError> {
        self.list_mut()?.decline_delete();
        Ok(())
    }

    /// Answers the pending confirmation with yes; `Ok(None)` when nothing
    /// was awaiting confirmation.
    pub fn begin_delete(&mut self) -> Result<Option<PendingVisit>, SessionError> {
        let view_id = self.view_id;
        let confirmed = self.list_mut()?.confirm_delete();
        Ok(confirmed
            .map(|(id, request)| PendingVisit::new(view_id, VisitIntent::Delete(id), request)))
    }

    /// Reconciles an answer into the session, dropping it when the view it
    /// was issued from has since been replaced.
    pub fn settle(&mut self, settled: SettledVisit) -> Settlement {
        let SettledVisit {
            origin,
            intent,
            request,
            result,
        } = settled;

        if origin != self.view_id {
            // A failed delete still owes the list its error flash.
            if let (VisitIntent::Delete(id), View::List(list)) = (intent, &mut self.view) {
                if let Some(message) = failure_message(&result) {
                    warn!(
                        employee_id = id.0,
                        path = %request.path,
                        %message,
                        "delete failed after the list was replaced"
                    );
                    list.delete_failed(id, message.as_str());
                    return Settlement::Failed { message };
                }
            }
            debug!(
                method = %request.method,
                path = %request.path,
                "discarding answer for a replaced view"
            );
            return Settlement::Stale;
        }

        match result {
            Ok(VisitResponse::Page(page)) => {
                if let (VisitIntent::Submit, View::Form(form)) = (intent, &mut self.view) {
                    if let Some(errors) = page.errors() {
                        debug!(url = page.url(), "submission redirected back with field errors");
                        form.submission_rejected(errors.clone());
                        return Settlement::Rejected(errors.clone());
                    }
                    form.submission_succeeded();
                }
                if request.method.is_mutation() {
                    info!(
                        method = %request.method,
                        path = %request.path,
                        url = page.url(),
                        "mutation accepted"
                    );
                }
                self.mount(page, request.preserve_scroll);
                Settlement::Navigated {
                    url: self.url.clone(),
                }
            }
            Ok(VisitResponse::Invalid(errors)) => {
                if let (VisitIntent::Submit, View::Form(form)) = (intent, &mut self.view) {
                    form.submission_rejected(errors.clone());
                    return Settlement::Rejected(errors);
                }
                let message = REJECTED_MESSAGE.to_string();
                self.surface_failure(intent, &message);
                Settlement::Failed { message }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(method = %request.method, path = %request.path, error = %err, "visit failed");
                self.surface_failure(intent, &message);
                Settlement::Failed { message }
            }
        }
    }

    fn surface_failure(&mut self, intent: VisitIntent, message: &str) {
        match (intent, &mut self.view) {
            (VisitIntent::Submit, View::Form(form)) => form.submission_failed(message),
            (VisitIntent::Delete(id), View::List(list)) => list.delete_failed(id, message),
            _ => {}
        }
    }

    fn mount(&mut self, page: Page, preserve_scroll: bool) {
        self.url = page.url().to_string();
        self.view = View::from_page(page, self.display_offset);
        self.view_id = ViewId(self.view_id.0 + 1);
        if !preserve_scroll {
            self.scroll = ScrollOffset::default();
        }
    }

    async fn run(&mut self, pending: PendingVisit) -> Settlement {
        let settled = dispatch(self.endpoint(), pending).await;
        self.settle(settled)
    }

    /// GET navigation to `request`'s path.
    pub async fn visit(&mut self, request: VisitRequest) -> Settlement {
        let pending = self.begin_visit(request);
        self.run(pending).await
    }

    /// Submits the mounted form. `Ok(None)` if a submission is already in
    /// flight.
    pub async fn submit(&mut self) -> Result<Option<Settlement>, SessionError> {
        let Some(pending) = self.begin_submit()? else {
            return Ok(None);
        };
        Ok(Some(self.run(pending).await))
    }

    /// Confirms the pending delete and waits for the server's answer.
    pub async fn confirm_delete(&mut self) -> Result<Option<Settlement>, SessionError> {
        let Some(pending) = self.begin_delete()? else {
            return Ok(None);
        };
        Ok(Some(self.run(pending).await))
    }

    /// Leaves the mounted form for the list.
    pub async fn cancel_form(&mut self) -> Result<Settlement, SessionError> {
        let request = self.form().ok_or(SessionError::NoActiveForm)?.cancel();
        Ok(self.visit(request).await)
    }
}

fn failure_message(result: &Result<VisitResponse, TransportError>) -> Option<String> {
    match result {
        Ok(VisitResponse::Page(_)) => None,
        Ok(VisitResponse::Invalid(_)) => Some(REJECTED_MESSAGE.to_string()),
        Err(err) => Some(err.user_message()),
    }
}
