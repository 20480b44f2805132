//! Source file locations and the execution context that may read them
//!
//! Both the catalog loader and the relationship graph builder read their
//! input fresh on every call. A [`SourceFiles`] handle says where the files
//! live and whether the caller is allowed to touch the filesystem at all.

use std::path::{Path, PathBuf};

use oxrdfio::RdfFormat;
use serde::{Deserialize, Serialize};

use crate::config::DataConfig;
use crate::error::{SourceErrorKind, TourismError};

/// Where the current code is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Has filesystem access
    Server,
    /// Browser-side or otherwise sandboxed; file reads are refused
    Client,
}

impl ExecutionContext {
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            ExecutionContext::Client
        } else {
            ExecutionContext::Server
        }
    }

    /// Fails with `ServerOnlyOperation` unless running server-side.
    pub fn require_server(self, operation: &str) -> crate::Result<()> {
        match self {
            ExecutionContext::Server => Ok(()),
            ExecutionContext::Client => {
                tracing::error!("{operation} can only be called on the server");
                Err(TourismError::server_only(operation))
            }
        }
    }
}

/// Serialization of the relationship triple file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripleFormat {
    Turtle,
    NTriples,
    RdfXml,
    N3,
}

impl TripleFormat {
    /// Guess the format from a file extension. Unknown extensions are read as Turtle,
    /// and so is `.rdf`: the published destination graph uses that extension for Turtle.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("nt") => TripleFormat::NTriples,
            Some("owl" | "xml") => TripleFormat::RdfXml,
            Some("n3") => TripleFormat::N3,
            _ => TripleFormat::Turtle,
        }
    }

    #[must_use]
    pub fn rdf_format(self) -> RdfFormat {
        match self {
            TripleFormat::Turtle => RdfFormat::Turtle,
            TripleFormat::NTriples => RdfFormat::NTriples,
            TripleFormat::RdfXml => RdfFormat::RdfXml,
            TripleFormat::N3 => RdfFormat::N3,
        }
    }
}

/// Locations of the destination catalog and the relationship triples.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    pub catalog_path: PathBuf,
    pub relationships_path: PathBuf,
    pub relationships_format: TripleFormat,
    pub context: ExecutionContext,
}

impl SourceFiles {
    /// Server-side handle; the triple format is derived from the file extension.
    pub fn server(catalog_path: impl Into<PathBuf>, relationships_path: impl Into<PathBuf>) -> Self {
        let relationships_path = relationships_path.into();
        Self {
            catalog_path: catalog_path.into(),
            relationships_format: TripleFormat::from_path(&relationships_path),
            relationships_path,
            context: ExecutionContext::Server,
        }
    }

    /// Handle for a context without filesystem access. Every read fails.
    #[must_use]
    pub fn client() -> Self {
        Self {
            catalog_path: PathBuf::new(),
            relationships_path: PathBuf::new(),
            relationships_format: TripleFormat::Turtle,
            context: ExecutionContext::Client,
        }
    }

    #[must_use]
    pub fn from_config(data: &DataConfig) -> Self {
        let mut sources = Self::server(&data.catalog_path, &data.relationships_path);
        if let Some(format) = data.relationships_format {
            sources = sources.with_format(format);
        }
        sources.context = ExecutionContext::current();
        sources
    }

    /// Override the format guessed from the file extension
    #[must_use]
    pub fn with_format(mut self, format: TripleFormat) -> Self {
        self.relationships_format = format;
        self
    }
}

/// Result of a fail-open load: the data handed to callers plus, when the
/// source could not be used, why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loaded<T> {
    pub data: T,
    pub error_kind: Option<SourceErrorKind>,
}

impl<T: Default> Loaded<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            error_kind: None,
        }
    }

    pub fn failed(kind: SourceErrorKind) -> Self {
        Self {
            data: T::default(),
            error_kind: Some(kind),
        }
    }

    /// Collapse a load result: source errors become empty data, everything
    /// else is propagated.
    pub fn from_result(result: crate::Result<T>) -> crate::Result<Self> {
        match result {
            Ok(data) => Ok(Self::ok(data)),
            Err(err) => match err.kind() {
                Some(kind) => Ok(Self::failed(kind)),
                None => Err(err),
            },
        }
    }
}

impl<T> Loaded<T> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error_kind.is_none()
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
