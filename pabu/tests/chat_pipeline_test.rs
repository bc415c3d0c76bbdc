use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pabu::config::{ChatConfig, RetrievalConfig};
use pabu::context::ContextAssembler;
use pabu::error::PabuError;
use pabu::llm::LlmProvider;
use pabu::models::{HrDocument, DocumentCategory, LeaveBalance, Role, TypeBalance};
use pabu::prompt::PromptBuilder;
use pabu::retrieval::RetrievalService;
use pabu::services::ChatService;

mod common;
use common::{test_backend, test_user};

fn chat_config() -> ChatConfig {
    ChatConfig {
        history_limit: 0,
        default_language: "en".to_string(),
    }
}

fn retrieval_config() -> RetrievalConfig {
    RetrievalConfig {
        enabled: true,
        limit: 10,
        excerpt_chars: 1000,
    }
}

fn chat_service(db: Arc<dyn pabu::db::DatabaseBackend>) -> ChatService {
    let retrieval = Arc::new(RetrievalService::new(Arc::clone(&db), retrieval_config()));
    ChatService::new(
        db,
        retrieval,
        PromptBuilder::new(0, 1000),
        LlmProvider::new(None),
        chat_config(),
        None,
    )
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let (db, _dir) = test_backend().await;
    let service = chat_service(db);

    let result = service
        .handle_turn("u_alice", "   ", None, None, &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(PabuError::Validation(_))));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (db, _dir) = test_backend().await;
    let service = chat_service(db);

    let result = service
        .handle_turn("u_ghost", "hello", None, None, &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(PabuError::NotFound(_))));
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let (db, _dir) = test_backend().await;
    db.upsert_user(&test_user("u_alice", "Alice", Role::Employee))
        .await
        .unwrap();
    let service = chat_service(Arc::clone(&db));

    let result = service
        .handle_turn(
            "u_alice",
            "hello",
            Some("conv_missing"),
            None,
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(PabuError::NotFound(_))));
}

#[tokio::test]
async fn model_failure_degrades_but_still_persists() {
    let (db, _dir) = test_backend().await;
    db.upsert_user(&test_user("u_alice", "Alice", Role::Employee))
        .await
        .unwrap();

    // No model configured: every completion fails and the pipeline must
    // answer with the canned apology instead of erroring the turn.
    let service = chat_service(Arc::clone(&db));

    let reply = service
        .handle_turn(
            "u_alice",
            "how many annual leave days do I have?",
            None,
            None,
            &CancellationToken::new(),
        )
        .await
        .expect("degraded turn should still succeed");

    assert!(reply.degraded);
    assert!(reply.reply.contains("having trouble"));

    let conversation = db
        .get_conversation(&reply.conversation_id)
        .await
        .unwrap()
        .expect("conversation should be persisted");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(
        conversation.messages[0].content,
        "how many annual leave days do I have?"
    );
    assert_eq!(conversation.messages[1].content, reply.reply);
}

#[tokio::test]
async fn follow_up_turns_append_to_the_same_conversation() {
    let (db, _dir) = test_backend().await;
    db.upsert_user(&test_user("u_alice", "Alice", Role::Employee))
        .await
        .unwrap();
    let service = chat_service(Arc::clone(&db));

    let first = service
        .handle_turn("u_alice", "hello", None, None, &CancellationToken::new())
        .await
        .unwrap();
    let second = service
        .handle_turn(
            "u_alice",
            "and my sick leave?",
            Some(&first.conversation_id),
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(first.conversation_id, second.conversation_id);

    let conversation = db
        .get_conversation(&first.conversation_id)
        .await
        .unwrap()
        .expect("conversation");
    assert_eq!(conversation.messages.len(), 4);
}

#[tokio::test]
async fn language_falls_back_to_user_profile() {
    let (db, _dir) = test_backend().await;
    let mut alice = test_user("u_alice", "Alice", Role::Employee);
    alice.language = "hi".to_string();
    db.upsert_user(&alice).await.unwrap();
    let service = chat_service(Arc::clone(&db));

    let reply = service
        .handle_turn("u_alice", "hello", None, None, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(reply.language, "hi");

    // Explicit request language wins over the profile.
    let reply = service
        .handle_turn(
            "u_alice",
            "hello",
            None,
            Some("ar"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(reply.language, "ar");
}

// End-to-end system prompt: stored balances and ranked documents flow into
// the one system message.
#[tokio::test]
async fn system_prompt_reflects_stored_context() {
    let (db, _dir) = test_backend().await;
    let alice = test_user("u_alice", "Alice", Role::Employee);
    db.upsert_user(&alice).await.unwrap();

    let mut balance = LeaveBalance::default_for("u_alice");
    balance.annual = TypeBalance {
        earned: 20,
        used: 3,
        available: 15,
        pending: 2,
    };
    db.put_leave_balance(&balance).await.unwrap();

    let policy = HrDocument::new(
        "Leave Policy".to_string(),
        "Annual leave accrues monthly. Carry-over caps at 10 days.".to_string(),
        DocumentCategory::Policy,
        "2.0".to_string(),
        vec!["leave".to_string(), "policy".to_string()],
    );
    db.create_hr_document(&policy).await.unwrap();

    let assembler = ContextAssembler::new(Arc::clone(&db));
    let retrieval = RetrievalService::new(Arc::clone(&db), retrieval_config());
    let builder = PromptBuilder::new(0, 1000);

    let context = assembler.assemble(&alice).await;
    let docs = retrieval.search("what is the leave policy?").await.unwrap();
    assert!(!docs.is_empty());

    let messages = builder.build_messages(&[], &context, &docs, "en");
    let system = &messages[0].content;

    assert!(system.contains("Name: Alice"));
    assert!(system.contains("Annual Leave: 15 days available (3 used, 2 pending)"));
    assert!(system.contains("Document: Leave Policy"));
    assert!(system.contains("Version: 2.0"));
    assert!(system.contains("Carry-over caps at 10 days."));
}
