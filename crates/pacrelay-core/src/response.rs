//! Maps requested resource names to finished artifacts.

use std::fmt;

use crate::{
    error::RepoError,
    repo::{listing, RepoGenerator, Snapshot},
    signature::PlaceholderSignature,
    RepoResult,
};

pub const DB_CONTENT_TYPE: &str = "application/vnd.pacman.db";
pub const FILES_CONTENT_TYPE: &str = "application/vnd.pacman.files";
pub const SIGNATURE_CONTENT_TYPE: &str = "application/pgp-signature";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";
pub const GZIP_ENCODING: &str = "gzip";

pub const LISTING_NAME: &str = "packages.txt";

/// A resource a client can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Database,
    Files,
    DatabaseSignature,
    FilesSignature,
    Listing,
    /// Anything else; served when it names a valid package.
    Package(String),
}

impl Resource {
    /// Resolves `name` for a repository called `repo`. A leading `/` is
    /// ignored.
    pub fn parse(name: &str, repo: &str) -> Self {
        let name = name.trim_start_matches('/');
        if name == LISTING_NAME {
            return Self::Listing;
        }

        let Some(rest) = name.strip_prefix(repo).and_then(|r| r.strip_prefix('.')) else {
            return Self::Package(name.to_string());
        };
        match rest {
            "db" | "db.tar.gz" => Self::Database,
            "files" | "files.tar.gz" => Self::Files,
            "db.sig" | "db.tar.gz.sig" => Self::DatabaseSignature,
            "files.sig" | "files.tar.gz.sig" => Self::FilesSignature,
            _ => Self::Package(name.to_string()),
        }
    }

    /// Canonical file name of the resource.
    pub fn file_name(&self, repo: &str) -> String {
        match self {
            Self::Database => format!("{repo}.db"),
            Self::Files => format!("{repo}.files"),
            Self::DatabaseSignature => format!("{repo}.db.sig"),
            Self::FilesSignature => format!("{repo}.files.sig"),
            Self::Listing => LISTING_NAME.to_string(),
            Self::Package(name) => name.clone(),
        }
    }

    /// Whether answering requires the release listing.
    pub fn needs_releases(&self) -> bool {
        !matches!(self, Self::DatabaseSignature | Self::FilesSignature)
    }
}

/// Body of a [`Response`].
pub enum Payload {
    Bytes(Vec<u8>),
    /// Random stand-in for a detached signature. Never verifies.
    Placeholder(PlaceholderSignature),
    /// Location of a package download.
    Redirect(String),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Placeholder(sig) => fmt::Debug::fmt(sig, f),
            Self::Redirect(url) => f.debug_tuple("Redirect").field(url).finish(),
        }
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub content_encoding: Option<&'static str>,
    pub payload: Payload,
}

impl Response {
    fn ok(content_type: &'static str, payload: Payload) -> Self {
        Self {
            status: 200,
            content_type,
            content_encoding: None,
            payload,
        }
    }

    fn text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            content_encoding: None,
            payload: Payload::Bytes(body.into_bytes()),
        }
    }

    pub fn database(bytes: Vec<u8>) -> Self {
        Self {
            content_encoding: Some(GZIP_ENCODING),
            ..Self::ok(DB_CONTENT_TYPE, Payload::Bytes(bytes))
        }
    }

    pub fn files(bytes: Vec<u8>) -> Self {
        Self {
            content_encoding: Some(GZIP_ENCODING),
            ..Self::ok(FILES_CONTENT_TYPE, Payload::Bytes(bytes))
        }
    }

    pub fn placeholder() -> Self {
        Self::ok(
            SIGNATURE_CONTENT_TYPE,
            Payload::Placeholder(PlaceholderSignature::generate()),
        )
    }

    pub fn listing(text: String) -> Self {
        Self::text(200, text)
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            status: 302,
            content_type: TEXT_CONTENT_TYPE,
            content_encoding: None,
            payload: Payload::Redirect(url.into()),
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::text(404, format!("# Error: resource not found: {name}"))
    }

    pub fn error(err: &RepoError) -> Self {
        Self::text(500, format!("# Error: {err}"))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match &self.payload {
            Payload::Redirect(url) => Some(url),
            _ => None,
        }
    }

    /// Raw body bytes; a redirect's body is its target URL.
    pub fn body(&self) -> &[u8] {
        match &self.payload {
            Payload::Bytes(bytes) => bytes,
            Payload::Placeholder(sig) => sig.as_bytes(),
            Payload::Redirect(url) => url.as_bytes(),
        }
    }
}

/// Builds the response for `resource` from a classified listing.
pub fn assemble(
    generator: &RepoGenerator,
    resource: &Resource,
    snapshot: &Snapshot,
) -> RepoResult<Response> {
    let response = match resource {
        Resource::Database => Response::database(generator.database(&snapshot.retained)?),
        Resource::Files => Response::files(generator.files_database(&snapshot.retained)?),
        Resource::DatabaseSignature | Resource::FilesSignature => Response::placeholder(),
        Resource::Listing => Response::listing(listing(&snapshot.all)),
        Resource::Package(name) => {
            match snapshot.find(name) {
                Some(pkg) => Response::redirect(&pkg.download_url),
                None => Response::not_found(name),
            }
        }
    };
    Ok(response)
}
