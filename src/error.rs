use thiserror::Error;

pub type APIResult<T> = Result<T, APIError>;

/// Error returned by every fallible operation of this crate.
///
/// The actual cause is boxed to keep `Result`s small; match on it through
/// [`APIError::kind`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct APIError {
    inner: Box<APIErrorInner>,
}

impl APIError {
    #[must_use]
    pub fn kind(&self) -> &APIErrorInner {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> APIErrorInner {
        *self.inner
    }

    /// HTTP status of a rejected token or resource request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self.kind() {
            APIErrorInner::Auth { status, .. } | APIErrorInner::BadRequest { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Raw response body of a rejected token or resource request.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self.kind() {
            APIErrorInner::Auth { body, .. } | APIErrorInner::BadRequest { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum APIErrorInner {
    #[error("http transport error: {0}")]
    Ureq(#[from] ureq::Error),
    #[error("could not build request: {0}")]
    Http(#[from] ureq::http::Error),
    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("environment variable {name} is not usable: {source}")]
    EnvVar {
        name: &'static str,
        source: std::env::VarError,
    },
    #[error("token refresh rejected with status {status}: {body}")]
    Auth { status: u16, body: String },
    #[error("request rejected with status {status}: {body}")]
    BadRequest { status: u16, body: String },
    #[error("expected a JSON object page, found {found}")]
    PaginationShape { found: &'static str },
    #[error("page has no `{field}` array")]
    MissingResultsField { field: String },
    #[error("gave up after {limit} pages, the server kept sending a nextToken")]
    PageLimit { limit: usize },
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Failures specific to the asynchronous reporting flow.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report submission returned no reportId: {body}")]
    MissingReportId { body: String },
    #[error("polling report {report_id} failed: {source}")]
    Poll {
        report_id: String,
        source: APIError,
    },
    #[error("status of report {report_id} is malformed: {reason}")]
    MalformedStatus { report_id: String, reason: String },
    #[error("downloading report {report_id} failed: {source}")]
    Download {
        report_id: String,
        source: ureq::Error,
    },
    #[error("download of report {report_id} returned status {status}: {body}")]
    DownloadStatus {
        report_id: String,
        status: u16,
        body: String,
    },
    #[error("report {report_id} is not valid gzip: {source}")]
    Decompress {
        report_id: String,
        source: std::io::Error,
    },
    #[error("report {report_id} is not valid JSON: {source}")]
    Decode {
        report_id: String,
        source: serde_json::Error,
    },
    #[error("report {report_id} was still pending after {polls} polls")]
    PollLimit { report_id: String, polls: usize },
}

impl From<APIErrorInner> for APIError {
    fn from(value: APIErrorInner) -> Self {
        Self {
            inner: Box::new(value),
        }
    }
}

macro_rules! impl_from_inner {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for APIError {
                fn from(value: $ty) -> Self {
                    APIErrorInner::from(value).into()
                }
            }
        )+
    };
}

impl_from_inner!(
    ureq::Error,
    ureq::http::Error,
    url::ParseError,
    serde_json::Error,
    std::io::Error,
    ReportError,
);
