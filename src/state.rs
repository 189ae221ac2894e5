//! Application state management

use std::sync::Arc;

use crate::analysis::{Analyzer, StructuredGenerator};
use crate::config::Config;
use crate::document::{DocumentExtractor, PagedDocumentLoader};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extractor: DocumentExtractor,
    analyzer: Analyzer,
}

impl AppState {
    /// Create application state from explicitly constructed collaborators
    pub fn new(
        config: Config,
        loader: Arc<dyn PagedDocumentLoader>,
        generator: Arc<dyn StructuredGenerator>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                extractor: DocumentExtractor::new(loader),
                analyzer: Analyzer::new(generator),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document extractor
    pub fn extractor(&self) -> &DocumentExtractor {
        &self.inner.extractor
    }

    /// Get the analyzer
    pub fn analyzer(&self) -> &Analyzer {
        &self.inner.analyzer
    }
}
