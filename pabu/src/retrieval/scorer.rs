use crate::models::{HrDocument, ScoredDocument};

/// Ranks a document corpus against a free-text query.
pub trait Scorer: Send + Sync {
    fn rank(&self, query: &str, documents: Vec<HrDocument>, limit: usize) -> Vec<ScoredDocument>;
}

/// Keyword scorer over title, content, and tags.
///
/// Weights, per document:
///   - full query appears in title: +10
///   - each query token in title: +5
///   - full query appears in content: +5
///   - each occurrence of each token in content: +1
///   - full query appears in a tag: +3 per tag
///   - each token in a tag: +2 per tag
///
/// Query tokens are whitespace-split words longer than two characters,
/// lowercased. Zero-score documents are dropped; ties keep corpus order.
#[derive(Debug, Default, Clone)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    fn score(query: &str, tokens: &[String], doc: &HrDocument) -> u32 {
        let mut score: u32 = 0;
        let title = doc.title.to_lowercase();
        let content = doc.content.to_lowercase();
        let tags: Vec<String> = doc.tags.iter().map(|t| t.to_lowercase()).collect();

        if title.contains(query) {
            score += 10;
        }
        for token in tokens {
            if title.contains(token.as_str()) {
                score += 5;
            }
        }

        if content.contains(query) {
            score += 5;
        }
        for token in tokens {
            score += content.matches(token.as_str()).count() as u32;
        }

        for tag in &tags {
            if tag.contains(query) {
                score += 3;
            }
            for token in tokens {
                if tag.contains(token.as_str()) {
                    score += 2;
                }
            }
        }

        score
    }
}

impl Scorer for KeywordScorer {
    fn rank(&self, query: &str, documents: Vec<HrDocument>, limit: usize) -> Vec<ScoredDocument> {
        let query = query.to_lowercase();
        let tokens: Vec<String> = query
            .split_whitespace()
            .filter(|word| word.len() > 2)
            .map(str::to_string)
            .collect();

        let mut scored: Vec<ScoredDocument> = documents
            .into_iter()
            .map(|document| {
                let score = Self::score(&query, &tokens, &document);
                ScoredDocument { document, score }
            })
            .filter(|item| item.score > 0)
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, content: &str, tags: &[&str]) -> HrDocument {
        HrDocument::new(
            title.to_string(),
            content.to_string(),
            Default::default(),
            "1.0".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_title_exact_match_outranks_content_match() {
        let docs = vec![
            doc("Expense Reports", "leave is mentioned here once", &[]),
            doc("Leave Policy", "how to apply", &[]),
        ];

        let ranked = KeywordScorer::new().rank("leave policy", docs, 10);
        assert_eq!(ranked[0].document.title, "Leave Policy");
        // full query in title (+10) and both tokens in title (+5 each)
        assert_eq!(ranked[0].score, 20);
    }

    #[test]
    fn test_content_occurrences_count_individually() {
        let docs = vec![doc(
            "Handbook",
            "remote remote remote work guidelines",
            &[],
        )];

        let ranked = KeywordScorer::new().rank("remote", docs, 10);
        // full query in content (+5) plus three occurrences (+1 each)
        assert_eq!(ranked[0].score, 8);
    }

    #[test]
    fn test_tag_matches() {
        let docs = vec![doc("Handbook", "general info", &["benefits", "insurance"])];

        let ranked = KeywordScorer::new().rank("benefits", docs, 10);
        // tag contains full query (+3) and token (+2)
        assert_eq!(ranked[0].score, 5);
    }

    #[test]
    fn test_zero_score_documents_dropped() {
        let docs = vec![
            doc("Leave Policy", "annual leave rules", &[]),
            doc("Office Map", "floor plan", &[]),
        ];

        let ranked = KeywordScorer::new().rank("leave", docs, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].document.title, "Leave Policy");
    }

    #[test]
    fn test_short_tokens_ignored() {
        // "is" and "my" are two characters or fewer and contribute nothing
        let docs = vec![doc("FAQ", "is my", &[])];
        let ranked = KeywordScorer::new().rank("is my", docs, 10);
        // full query still matches content as a substring
        assert_eq!(ranked[0].score, 5);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let docs = vec![
            doc("Policy A", "vacation", &[]),
            doc("Policy B", "vacation", &[]),
        ];

        let ranked = KeywordScorer::new().rank("vacation", docs, 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].document.title, "Policy A");
        assert_eq!(ranked[1].document.title, "Policy B");
    }

    #[test]
    fn test_limit_truncates() {
        let docs = vec![
            doc("Leave Policy", "", &[]),
            doc("Sick Leave", "", &[]),
            doc("Annual Leave", "", &[]),
        ];

        let ranked = KeywordScorer::new().rank("leave", docs, 2);
        assert_eq!(ranked.len(), 2);
    }
}
