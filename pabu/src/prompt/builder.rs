use std::fmt::Write;

use chrono::Utc;

use crate::context::ContextBundle;
use crate::llm::ChatMessage;
use crate::models::{ConversationTurn, ScoredDocument, TurnRole};

/// Builds the message sequence for one chat completion: exactly one system
/// message carrying all assembled context, followed by the conversation
/// history in original order.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// Maximum history turns forwarded. 0 keeps everything; otherwise the
    /// oldest turns are dropped first.
    history_limit: usize,
    /// Characters of document content quoted per excerpt.
    excerpt_chars: usize,
}

impl PromptBuilder {
    pub fn new(history_limit: usize, excerpt_chars: usize) -> Self {
        Self {
            history_limit,
            excerpt_chars,
        }
    }

    pub fn build_messages(
        &self,
        history: &[ConversationTurn],
        context: &ContextBundle,
        docs: &[ScoredDocument],
        language: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt(
            context,
            docs,
            language,
        )));

        let kept: Vec<&ConversationTurn> = history
            .iter()
            .filter(|turn| !turn.content.trim().is_empty())
            .collect();
        let skip = if self.history_limit > 0 && kept.len() > self.history_limit {
            kept.len() - self.history_limit
        } else {
            0
        };

        for turn in kept.into_iter().skip(skip) {
            messages.push(match turn.role {
                TurnRole::User => ChatMessage::user(turn.content.clone()),
                TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
            });
        }

        messages
    }

    fn system_prompt(&self, context: &ContextBundle, docs: &[ScoredDocument], language: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "You are an intelligent HR Assistant. Your mission is to help employees with:\n\
             - Leave applications and balances\n\
             - Payslips and salary information\n\
             - Company policies and documents\n\
             - Performance reviews and appraisals\n\
             - Organizational hierarchy\n\
             - Benefits and general HR inquiries\n\n",
        );

        let user = &context.user;
        let _ = write!(
            prompt,
            "User Information:\n\
             - Name: {}\n\
             - Role: {}\n\
             - Employee ID: {}\n\
             - Department: {}\n",
            user.name, user.role, user.employee_id, user.department
        );

        let balance = &context.balance;
        let _ = write!(
            prompt,
            "\nLeave Balance:\n\
             - Annual Leave: {} days available ({} used, {} pending)\n\
             - Sick Leave: {} days available ({} used)\n\
             - Emergency Leave: {} days available ({} used)\n",
            balance.annual.available,
            balance.annual.used,
            balance.annual.pending,
            balance.sick.available,
            balance.sick.used,
            balance.emergency.available,
            balance.emergency.used,
        );

        if let Some(team) = &context.team {
            if !team.is_empty() {
                prompt.push_str("\nTeam Members (Direct Reports):\n");
                for member in team {
                    let _ = write!(
                        prompt,
                        "\n- {} ({}):\n  Position: {}\n  Department: {}\n  Site: {}\n  Projects: {}\n",
                        member.name,
                        member.employee_id,
                        member.position,
                        member.department,
                        member.site.as_deref().unwrap_or("N/A"),
                        if member.projects.is_empty() {
                            "None".to_string()
                        } else {
                            member.projects.join(", ")
                        },
                    );
                    let _ = write!(prompt, "  Status: {}", member.status);
                    if let Some(leave) = &member.current_leave {
                        let _ = write!(
                            prompt,
                            " (On {} leave until {})",
                            leave.leave_type,
                            leave.end_date.date_naive()
                        );
                    }
                    prompt.push('\n');
                    if let Some(balance) = &member.balance {
                        let _ = write!(
                            prompt,
                            "  Leave Balance: Annual {} days, Sick {} days\n",
                            balance.annual.available, balance.sick.available
                        );
                    }
                }
                prompt.push_str(
                    "\nIMPORTANT FOR MANAGERS:\n\
                     - You can answer questions about team members by name or employee ID\n\
                     - You have access to their projects, sites, leave status, and leave balances\n\
                     - When asked about an employee, provide their current status, projects, site location, and leave information\n",
                );
            }
        }

        prompt.push_str(
            "\nBe professional, empathetic, and accurate. Never hallucinate or make up \
             information. Use only the actual user data provided above. If the query is about \
             leave, use the exact leave balance numbers shown. For policy questions, rely on the \
             retrieved documents. If you don't know something, say so and suggest contacting HR.\n",
        );

        let _ = write!(prompt, "\nCurrent date: {}\n", Utc::now().date_naive());
        let _ = write!(prompt, "Language preference: {}\n", language);
        let _ = write!(
            prompt,
            "\nCRITICAL LANGUAGE INSTRUCTION:\n\
             - You MUST respond in {}\n\
             - Always maintain the same language throughout the conversation\n\
             - Translate all responses to match the user's language preference\n",
            language_name(language)
        );

        if !docs.is_empty() {
            prompt.push_str("\nRelevant HR Documents from Knowledge Base (RAG):\n");
            let rendered: Vec<String> = docs
                .iter()
                .map(|scored| self.render_document(scored))
                .collect();
            prompt.push_str(&rendered.join("\n\n---\n\n"));
            prompt.push_str(
                "\n\nIMPORTANT: Use this information to answer questions accurately. Always \
                 cite the document name and version when referencing policies. If the user asks \
                 about something covered in these documents, provide specific details from the \
                 documents.",
            );
        }

        prompt
    }

    fn render_document(&self, scored: &ScoredDocument) -> String {
        let doc = &scored.document;
        let excerpt: String = doc.content.chars().take(self.excerpt_chars).collect();
        let truncated = doc.content.chars().count() > self.excerpt_chars;
        format!(
            "Document: {}\nCategory: {}\nVersion: {}\nTags: {}\nContent: {}{}",
            doc.title,
            doc.category,
            doc.version,
            doc.tags.join(", "),
            excerpt,
            if truncated { "..." } else { "" },
        )
    }
}

/// Supported response languages. Unknown codes fall back to English.
fn language_name(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "ar" => "Arabic (with RTL formatting)",
        "hi" => "Hindi",
        "ur" => "Urdu",
        "tl" => "Tagalog",
        "ml" => "Malayalam",
        "ta" => "Tamil",
        "ne" => "Nepali (नेपाली)",
        _ => "English",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextBundle, CurrentLeave, TeamMember};
    use crate::llm::ChatRole;
    use crate::models::{
        Availability, DocumentCategory, HrDocument, LeaveBalance, LeaveType, Role, TypeBalance,
        User,
    };
    use chrono::Utc;

    fn user(name: &str, role: Role) -> User {
        let mut user = User::new(
            format!("u_{name}"),
            format!("{name}@corp.example"),
            name.to_string(),
            format!("EMP-{name}"),
        );
        user.role = role;
        user.department = "Engineering".to_string();
        user
    }

    fn bundle(user: User) -> ContextBundle {
        let balance = LeaveBalance::default_for(&user.id);
        ContextBundle {
            user,
            balance,
            team: None,
        }
    }

    fn turn(role: TurnRole, content: &str) -> ConversationTurn {
        ConversationTurn::new(role, content.to_string(), "en".to_string())
    }

    #[test]
    fn exactly_one_system_message_first() {
        let builder = PromptBuilder::new(0, 1000);
        let history = vec![
            turn(TurnRole::User, "hi"),
            turn(TurnRole::Assistant, "hello"),
            turn(TurnRole::User, "what is my leave balance?"),
        ];

        let messages =
            builder.build_messages(&history, &bundle(user("alice", Role::Employee)), &[], "en");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[1..].iter().all(|m| m.role != ChatRole::System));
        assert_eq!(messages[3].content, "what is my leave balance?");
    }

    #[test]
    fn balance_lines_use_exact_figures() {
        let builder = PromptBuilder::new(0, 1000);
        let mut context = bundle(user("alice", Role::Employee));
        context.balance.annual = TypeBalance {
            earned: 20,
            used: 3,
            available: 15,
            pending: 2,
        };

        let messages = builder.build_messages(&[], &context, &[], "en");
        let system = &messages[0].content;

        assert!(system.contains("Annual Leave: 15 days available (3 used, 2 pending)"));
        assert!(system.contains("Sick Leave: 10 days available (0 used)"));
        assert!(system.contains("Emergency Leave: 5 days available (0 used)"));
    }

    #[test]
    fn empty_turns_are_filtered() {
        let builder = PromptBuilder::new(0, 1000);
        let history = vec![
            turn(TurnRole::User, "first"),
            turn(TurnRole::Assistant, "   "),
            turn(TurnRole::User, ""),
            turn(TurnRole::User, "second"),
        ];

        let messages =
            builder.build_messages(&history, &bundle(user("alice", Role::Employee)), &[], "en");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "first");
        assert_eq!(messages[2].content, "second");
    }

    #[test]
    fn history_limit_drops_oldest_first() {
        let builder = PromptBuilder::new(2, 1000);
        let history = vec![
            turn(TurnRole::User, "one"),
            turn(TurnRole::Assistant, "two"),
            turn(TurnRole::User, "three"),
        ];

        let messages =
            builder.build_messages(&history, &bundle(user("alice", Role::Employee)), &[], "en");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "two");
        assert_eq!(messages[2].content, "three");
    }

    #[test]
    fn team_block_marks_members_on_leave() {
        let builder = PromptBuilder::new(0, 1000);
        let mut context = bundle(user("bob", Role::Manager));
        context.team = Some(vec![TeamMember {
            id: "u_charlie".to_string(),
            name: "Charlie".to_string(),
            employee_id: "EMP-charlie".to_string(),
            position: "Engineer".to_string(),
            department: "Engineering".to_string(),
            site: None,
            projects: vec!["Atlas".to_string()],
            status: Availability::OnLeave,
            current_leave: Some(CurrentLeave {
                leave_type: LeaveType::Annual,
                end_date: Utc::now(),
            }),
            balance: None,
        }]);

        let messages = builder.build_messages(&[], &context, &[], "en");
        let system = &messages[0].content;

        assert!(system.contains("Team Members (Direct Reports):"));
        assert!(system.contains("Charlie (EMP-charlie)"));
        assert!(system.contains("Status: on_leave (On annual leave until"));
        assert!(system.contains("Projects: Atlas"));
    }

    #[test]
    fn empty_team_present_but_renders_no_roster() {
        let builder = PromptBuilder::new(0, 1000);
        let mut context = bundle(user("bob", Role::Manager));
        context.team = Some(Vec::new());

        let messages = builder.build_messages(&[], &context, &[], "en");
        assert!(!messages[0].content.contains("Team Members"));
    }

    #[test]
    fn documents_render_with_excerpt_and_delimiter() {
        let builder = PromptBuilder::new(0, 10);
        let doc = HrDocument::new(
            "Leave Policy".to_string(),
            "x".repeat(50),
            DocumentCategory::Policy,
            "2.0".to_string(),
            vec!["leave".to_string()],
        );
        let other = HrDocument::new(
            "Handbook".to_string(),
            "short".to_string(),
            DocumentCategory::Handbook,
            "1.0".to_string(),
            vec![],
        );
        let docs = vec![
            ScoredDocument {
                document: doc,
                score: 12,
            },
            ScoredDocument {
                document: other,
                score: 3,
            },
        ];

        let messages =
            builder.build_messages(&[], &bundle(user("alice", Role::Employee)), &docs, "en");
        let system = &messages[0].content;

        assert!(system.contains("Relevant HR Documents from Knowledge Base (RAG):"));
        assert!(system.contains("Document: Leave Policy"));
        assert!(system.contains(&format!("Content: {}...", "x".repeat(10))));
        assert!(system.contains("\n\n---\n\n"));
        assert!(system.contains("cite the document name and version"));
    }

    #[test]
    fn excerpt_is_char_boundary_safe() {
        let builder = PromptBuilder::new(0, 3);
        let doc = HrDocument::new(
            "Multibyte".to_string(),
            "नेपाली नीति".to_string(),
            DocumentCategory::Policy,
            "1.0".to_string(),
            vec![],
        );
        let docs = vec![ScoredDocument {
            document: doc,
            score: 1,
        }];

        // Would panic on a byte-indexed slice; chars() keeps it safe.
        let messages =
            builder.build_messages(&[], &bundle(user("alice", Role::Employee)), &docs, "ne");
        assert!(messages[0].content.contains("Content: नेप..."));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let builder = PromptBuilder::new(0, 1000);
        let messages = builder.build_messages(
            &[],
            &bundle(user("alice", Role::Employee)),
            &[],
            "xx",
        );
        assert!(messages[0].content.contains("You MUST respond in English"));

        let messages =
            builder.build_messages(&[], &bundle(user("alice", Role::Employee)), &[], "ta");
        assert!(messages[0].content.contains("You MUST respond in Tamil"));
    }
}
