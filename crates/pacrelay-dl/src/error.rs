use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DownloadError {
    #[error("Invalid URL: {url}")]
    #[diagnostic(code(pacrelay_dl::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    #[diagnostic(
        code(pacrelay_dl::network),
        help("Check your internet connection or try again later")
    )]
    Network(#[from] Box<ureq::Error>),

    #[error("HTTP {status}: {url}")]
    #[diagnostic(
        code(pacrelay_dl::http_error),
        help("A 401, 403 or 429 status usually means the API token is missing or rate limited")
    )]
    HttpError { status: u16, url: String },

    #[error("Unable to read release listing {path}")]
    #[diagnostic(
        code(pacrelay_dl::io),
        help("Check that the saved listing exists and is readable")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid response from server")]
    #[diagnostic(code(pacrelay_dl::invalid_response))]
    InvalidResponse,

    #[error("Malformed release listing: {0}")]
    #[diagnostic(
        code(pacrelay_dl::json),
        help("The release listing must be a JSON array of GitHub release objects")
    )]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DownloadError>;

impl From<ureq::Error> for DownloadError {
    fn from(e: ureq::Error) -> Self {
        Self::Network(Box::new(e))
    }
}
