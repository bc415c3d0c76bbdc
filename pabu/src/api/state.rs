use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::ingest::DocumentIngestor;
use crate::llm::LlmProvider;
use crate::prompt::PromptBuilder;
use crate::retrieval::RetrievalService;
use crate::services::ChatService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub llm: LlmProvider,
    pub retrieval: Arc<RetrievalService>,
    pub chat: Arc<ChatService>,
    pub ingestor: Arc<DocumentIngestor>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, llm: LlmProvider) -> Self {
        let config = Arc::new(config);
        let retrieval = Arc::new(RetrievalService::new(
            Arc::clone(&db),
            config.retrieval.clone(),
        ));
        let prompt = PromptBuilder::new(config.chat.history_limit, config.retrieval.excerpt_chars);
        let chat = Arc::new(ChatService::new(
            Arc::clone(&db),
            Arc::clone(&retrieval),
            prompt,
            llm.clone(),
            config.chat.clone(),
            config.llm.as_ref(),
        ));
        let ingestor = Arc::new(DocumentIngestor::new(Arc::clone(&db)));

        Self {
            config,
            db,
            llm,
            retrieval,
            chat,
            ingestor,
        }
    }
}
