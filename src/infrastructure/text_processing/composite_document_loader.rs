use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{DocumentLoader, DocumentLoaderError, PageReader};
use crate::domain::{ContentType, Document};

pub struct CompositeDocumentLoader {
    adapters: HashMap<ContentType, Arc<dyn DocumentLoader>>,
}

impl CompositeDocumentLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn DocumentLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl DocumentLoader for CompositeDocumentLoader {
    async fn load(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Arc<dyn PageReader>, DocumentLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            DocumentLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.load(data, document).await
    }
}
