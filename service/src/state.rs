use crate::config::Config;
use folio::gateway::{AiProvider, Gateway, OpenAiCompatibleProvider, SettleExecutor};
use folio::pdf::LopdfFallback;
use folio::render_core::{Exporter, HttpPdfConverter, PdfConverter};
use folio::resource::FileStorage;
use folio::traits::StorageBackend;
use std::sync::Arc;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// AI provider behind validation and image preprocessing
    pub gateway: Arc<Gateway>,

    /// HTML->PDF conversion with fallback
    pub exporter: Arc<Exporter>,

    /// Workspace blobs (photo libraries)
    pub storage: Arc<dyn StorageBackend>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn AiProvider>,
        converter: Arc<dyn PdfConverter>,
        storage: Arc<dyn StorageBackend>,
        config: Config,
    ) -> Self {
        let gateway = Gateway::new(provider)
            .with_budget(config.image.clone())
            .with_executor(SettleExecutor::new(config.concurrency.max_ai_in_flight));
        let exporter = Exporter::new(converter, Arc::new(LopdfFallback));

        Self {
            gateway: Arc::new(gateway),
            exporter: Arc::new(exporter),
            storage,
            config: Arc::new(config),
        }
    }

    /// Wires the production collaborators described by `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let provider = OpenAiCompatibleProvider::new(config.ai.clone())?;
        let converter = HttpPdfConverter::new(&config.pdf)?;
        let storage = FileStorage::new(&config.storage.path)?
            .with_max_blob_bytes(config.storage.max_blob_bytes);

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(converter),
            Arc::new(storage),
            config,
        ))
    }
}
