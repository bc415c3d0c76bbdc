use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::{ChatConfig, LlmConfig};
use crate::context::ContextAssembler;
use crate::db::traits::DatabaseBackend;
use crate::error::{PabuError, Result};
use crate::llm::{CompletionOptions, LlmProvider};
use crate::models::{Conversation, ConversationTurn, TurnRole};
use crate::prompt::PromptBuilder;
use crate::retrieval::RetrievalService;

const FALLBACK_REPLY: &str = "I'm sorry, I'm having trouble answering right now. \
Please try again in a moment, or contact HR directly if the matter is urgent.";

/// Result of one chat turn. `degraded` is set when the model call failed and
/// the reply is the canned apology rather than a completion.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub conversation_id: String,
    pub reply: String,
    pub language: String,
    pub degraded: bool,
}

/// Runs the full pipeline for one user message: context assembly, document
/// retrieval, prompt building, model call, persistence.
pub struct ChatService {
    db: Arc<dyn DatabaseBackend>,
    assembler: ContextAssembler,
    retrieval: Arc<RetrievalService>,
    prompt: PromptBuilder,
    llm: LlmProvider,
    config: ChatConfig,
    options: CompletionOptions,
}

impl ChatService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        retrieval: Arc<RetrievalService>,
        prompt: PromptBuilder,
        llm: LlmProvider,
        config: ChatConfig,
        llm_config: Option<&LlmConfig>,
    ) -> Self {
        let options = CompletionOptions {
            temperature: llm_config.map(|c| c.temperature),
            max_tokens: llm_config.map(|c| c.max_tokens),
            top_p: None,
        };

        Self {
            assembler: ContextAssembler::new(Arc::clone(&db)),
            db,
            retrieval,
            prompt,
            llm,
            config,
            options,
        }
    }

    /// One turn: failures below the model call degrade silently, a model-call
    /// failure is answered with an apology and still recorded, and a
    /// persistence failure is logged without failing the caller.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        message: &str,
        conversation_id: Option<&str>,
        language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ChatReply> {
        if message.trim().is_empty() {
            return Err(PabuError::Validation("Message cannot be empty".to_string()));
        }

        let user = self
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| PabuError::NotFound(format!("User {user_id} not found")))?;

        let language = language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| {
                if user.language.trim().is_empty() {
                    &self.config.default_language
                } else {
                    &user.language
                }
            })
            .to_string();

        let mut conversation = match conversation_id {
            Some(id) => self
                .db
                .get_conversation(id)
                .await?
                .ok_or_else(|| PabuError::NotFound(format!("Conversation {id} not found")))?,
            None => Conversation::new(user.id.clone(), language.clone()),
        };
        let is_new = conversation_id.is_none();

        let user_turn =
            ConversationTurn::new(TurnRole::User, message.to_string(), language.clone());

        let (context, docs) = tokio::join!(
            self.assembler.assemble(&user),
            self.retrieval.search_best_effort(message),
        );

        let mut history = conversation.messages.clone();
        history.push(user_turn.clone());
        let messages = self
            .prompt
            .build_messages(&history, &context, &docs, &language);

        let (reply, degraded) = match self.llm.chat(&messages, Some(&self.options), cancel).await {
            Ok(reply) => (reply, false),
            Err(error) => {
                tracing::error!(
                    user_id = %user.id,
                    conversation_id = %conversation.id,
                    error = %error,
                    "Chat completion failed, answering with fallback"
                );
                (FALLBACK_REPLY.to_string(), true)
            }
        };

        conversation.append(user_turn);
        conversation.append(ConversationTurn::new(
            TurnRole::Assistant,
            reply.clone(),
            language.clone(),
        ));

        let persisted = if is_new {
            self.db.create_conversation(&conversation).await
        } else {
            self.db.update_conversation(&conversation).await
        };
        if let Err(error) = persisted {
            tracing::error!(
                conversation_id = %conversation.id,
                error = %error,
                "Failed to persist conversation turn"
            );
        }

        Ok(ChatReply {
            conversation_id: conversation.id,
            reply,
            language,
            degraded,
        })
    }
}
