//! MetafieldContext: storage and tag lookup shared by every operation

use std::sync::Arc;

use metafield_config::StoreConfig;

use crate::error::Result;
use crate::store::Store;
use crate::tag_source::TagSource;

/// An operation that runs against a [`MetafieldContext`].
pub trait Execute {
    type Output;

    fn execute(&self, ctx: &MetafieldContext) -> Result<Self::Output>;
}

/// Context for metafield operations
///
/// Provides access to the store and the tag source, but doesn't contain
/// business logic. Operations use the context to read and write.
/// Cloning is cheap and clones share the same connection.
#[derive(Clone)]
pub struct MetafieldContext {
    store: Arc<Store>,
    tag_source: Arc<dyn TagSource>,
}

impl MetafieldContext {
    /// Start building a context over the store described by `config`.
    pub fn open(config: StoreConfig) -> MetafieldContextBuilder {
        MetafieldContextBuilder {
            config,
            tag_source: None,
        }
    }

    /// Context over a private in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::open(StoreConfig::in_memory()).build()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tag_source(&self) -> &dyn TagSource {
        self.tag_source.as_ref()
    }

    /// Run an operation against this context.
    pub fn run<E: Execute>(&self, operation: E) -> Result<E::Output> {
        operation.execute(self)
    }
}

/// Builder returned by [`MetafieldContext::open`]
pub struct MetafieldContextBuilder {
    config: StoreConfig,
    tag_source: Option<Arc<dyn TagSource>>,
}

impl MetafieldContextBuilder {
    /// Resolve tags through `source` instead of the store's own tag tables.
    pub fn with_tag_source(mut self, source: Arc<dyn TagSource>) -> Self {
        self.tag_source = Some(source);
        self
    }

    pub fn build(self) -> Result<MetafieldContext> {
        let store = Arc::new(Store::open(&self.config)?);
        let tag_source = match self.tag_source {
            Some(source) => source,
            None => store.clone() as Arc<dyn TagSource>,
        };
        Ok(MetafieldContext { store, tag_source })
    }
}
