use std::fmt;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, LOCATION},
    redirect, Client, Method, StatusCode,
};
use shared::{
    domain::EmployeeId,
    error::{ApiError, FieldErrors},
    protocol::{
        create_employee_route, edit_employee_route, employee_route, employees_route,
        EmployeeFields, Page, PageEnvelope,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::ClientSettings, error::TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl VisitMethod {
    pub fn is_mutation(self) -> bool {
        !matches!(self, VisitMethod::Get)
    }

    fn as_reqwest(self) -> Method {
        match self {
            VisitMethod::Get => Method::GET,
            VisitMethod::Post => Method::POST,
            VisitMethod::Put => Method::PUT,
            VisitMethod::Patch => Method::PATCH,
            VisitMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for VisitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRequest {
    pub method: VisitMethod,
    pub path: String,
    pub body: Option<EmployeeFields>,
    pub preserve_scroll: bool,
}

impl VisitRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: VisitMethod::Get,
            path: path.into(),
            body: None,
            preserve_scroll: false,
        }
    }

    pub fn list() -> Self {
        Self::get(employees_route())
    }

    pub fn create_form() -> Self {
        Self::get(create_employee_route())
    }

    pub fn show(id: EmployeeId) -> Self {
        Self::get(employee_route(id))
    }

    pub fn edit_form(id: EmployeeId) -> Self {
        Self::get(edit_employee_route(id))
    }

    pub fn store(fields: EmployeeFields) -> Self {
        Self {
            method: VisitMethod::Post,
            path: employees_route().to_string(),
            body: Some(fields),
            preserve_scroll: false,
        }
    }

    pub fn update(id: EmployeeId, fields: EmployeeFields) -> Self {
        Self {
            method: VisitMethod::Put,
            path: employee_route(id),
            body: Some(fields),
            preserve_scroll: false,
        }
    }

    pub fn destroy(id: EmployeeId) -> Self {
        Self {
            method: VisitMethod::Delete,
            path: employee_route(id),
            body: None,
            preserve_scroll: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum VisitResponse {
    /// The server produced a page to show next.
    Page(Page),
    /// The server rejected the submitted fields.
    Invalid(FieldErrors),
}

/// One request/response exchange against the employee resource.
#[async_trait]
pub trait ResourceEndpoint: Send + Sync {
    async fn visit(&self, request: VisitRequest) -> Result<VisitResponse, TransportError>;
}

const MAX_ERROR_BODY_LOG: usize = 256;

/// [`ResourceEndpoint`] over HTTP. Redirects are followed by hand so each
/// hop turns into a GET regardless of the original verb, and so the cookie
/// store sees every `Set-Cookie` that carries session flash data.
pub struct HttpEndpoint {
    http: Client,
    base_url: Url,
    max_redirects: usize,
}

impl HttpEndpoint {
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let base_url = Url::parse(&settings.server_url).map_err(|err| TransportError::InvalidUrl {
            url: settings.server_url.clone(),
            message: err.to_string(),
        })?;
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .cookie_store(true)
            .timeout(settings.request_timeout())
            .default_headers(page_headers())
            .build()
            .map_err(|err| TransportError::Network {
                path: settings.server_url.clone(),
                message: err.to_string(),
            })?;
        Ok(Self {
            http,
            base_url,
            max_redirects: settings.max_redirects,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, target: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(target)
            .map_err(|err| TransportError::InvalidUrl {
                url: target.to_string(),
                message: err.to_string(),
            })
    }

    async fn send(
        &self,
        method: VisitMethod,
        url: Url,
        body: Option<&EmployeeFields>,
    ) -> Result<reqwest::Response, TransportError> {
        let path = url.path().to_string();
        debug!(%method, %path, "dispatching visit");
        let mut builder = self.http.request(method.as_reqwest(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.send().await.map_err(|err| map_reqwest_error(&path, err))
    }
}

fn page_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("x-inertia", HeaderValue::from_static("true"));
    headers.insert(
        "x-requested-with",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers
}

fn map_reqwest_error(path: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            path: path.to_string(),
        }
    } else {
        TransportError::Network {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ResourceEndpoint for HttpEndpoint {
    async fn visit(&self, request: VisitRequest) -> Result<VisitResponse, TransportError> {
        let mut url = self.resolve(&request.path)?;
        let mut response = self
            .send(request.method, url.clone(), request.body.as_ref())
            .await?;
        let mut hops = 0;

        while response.status().is_redirection() {
            if hops == self.max_redirects {
                return Err(TransportError::TooManyRedirects(hops));
            }
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| TransportError::MissingLocation {
                    path: url.path().to_string(),
                })?;
            url = url.join(location).map_err(|err| TransportError::InvalidUrl {
                url: location.to_string(),
                message: err.to_string(),
            })?;
            hops += 1;
            response = self.send(VisitMethod::Get, url.clone(), None).await?;
        }

        let status = response.status();
        let path = url.path().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(&path, err))?;

        if status.is_success() {
            let envelope: PageEnvelope =
                serde_json::from_slice(&body).map_err(shared::error::ProtocolError::from)?;
            let page = Page::try_from(envelope)?;
            return Ok(VisitResponse::Page(page));
        }

        if let Some(errors) = validation_errors(status, &body) {
            return Ok(VisitResponse::Invalid(errors));
        }

        let message = serde_json::from_slice::<ApiError>(&body)
            .ok()
            .and_then(|api_error| api_error.message);
        warn!(
            status = status.as_u16(),
            %path,
            body = %String::from_utf8_lossy(&body[..body.len().min(MAX_ERROR_BODY_LOG)]),
            "visit failed"
        );
        Err(TransportError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Any 4xx whose body decodes to at least one field error is a rejection.
fn validation_errors(status: StatusCode, body: &[u8]) -> Option<FieldErrors> {
    if !status.is_client_error() {
        return None;
    }
    FieldErrors::from_body(body)
        .ok()
        .filter(|errors| !errors.is_empty())
}

#[cfg(test)]
#[path = "tests/endpoint_tests.rs"]
mod tests;
