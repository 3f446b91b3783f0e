use crate::domain::error::{AppError, Result};
use crate::infrastructure::llm::response::clean_llm_response;
use crate::infrastructure::llm::LlmClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const MAX_SUGGESTIONS: usize = 8;

const SYSTEM_PROMPT: &str = "You are an activity planner helping someone spend \
time with friends in ways that match their personal values. You reply with \
machine-readable JSON only.";

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub core_values: Vec<String>,
    #[serde(default)]
    pub location_hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySuggestion {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub setting: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryOutcome {
    pub suggestions: Vec<ActivitySuggestion>,
    pub source: SuggestionSource,
}

pub struct ActivityDiscoveryUseCase {
    llm: Arc<dyn LlmClient + Send + Sync>,
}

impl ActivityDiscoveryUseCase {
    pub fn new(llm: Arc<dyn LlmClient + Send + Sync>) -> Self {
        Self { llm }
    }

    /// Asks the model for concrete activity ideas. Two-level fallback: a
    /// reply that fails to parse triggers one retry with a stricter
    /// prompt; if that also fails to parse, a built-in list is returned.
    /// Transport errors propagate to the caller.
    pub async fn execute(&self, request: &DiscoveryRequest) -> Result<DiscoveryOutcome> {
        let reply = self
            .llm
            .generate(SYSTEM_PROMPT, &detailed_prompt(request))
            .await?;

        if let Some(suggestions) = parse_suggestions(&reply) {
            return Ok(DiscoveryOutcome {
                suggestions,
                source: SuggestionSource::Model,
            });
        }

        warn!("Discovery reply was not parseable JSON, retrying with strict prompt");
        let retry = self
            .llm
            .generate(SYSTEM_PROMPT, &strict_prompt(request))
            .await?;

        if let Some(suggestions) = parse_suggestions(&retry) {
            return Ok(DiscoveryOutcome {
                suggestions,
                source: SuggestionSource::Model,
            });
        }

        warn!("Discovery retry also failed to parse, serving fallback suggestions");
        Ok(DiscoveryOutcome {
            suggestions: fallback_suggestions(),
            source: SuggestionSource::Fallback,
        })
    }
}

fn detailed_prompt(request: &DiscoveryRequest) -> String {
    let mut prompt = String::from(
        "Suggest up to 8 concrete social activities as a JSON array. Each \
element must be an object with keys \"title\" (string), \"description\" \
(string), \"duration_minutes\" (integer) and \"setting\" (\"indoor\" or \
\"outdoor\").",
    );

    if !request.interests.is_empty() {
        prompt.push_str(&format!("\nInterests: {}.", request.interests.join(", ")));
    }
    if !request.core_values.is_empty() {
        prompt.push_str(&format!(
            "\nThe person values: {}.",
            request.core_values.join(", ")
        ));
    }
    if let Some(location) = &request.location_hint {
        prompt.push_str(&format!("\nThey are based in {}.", location));
    }

    prompt
}

fn strict_prompt(request: &DiscoveryRequest) -> String {
    format!(
        "{}\nReturn ONLY the JSON array. No prose, no markdown, no keys other \
than title, description, duration_minutes, setting.",
        detailed_prompt(request)
    )
}

/// Extracts the outermost JSON array from a cleaned reply and deserializes
/// it. Returns None on any shape problem so the caller can retry.
fn parse_suggestions(reply: &str) -> Option<Vec<ActivitySuggestion>> {
    let cleaned = clean_llm_response(reply);
    let start = cleaned.find('[')?;
    let end = cleaned.rfind(']')?;
    if end < start {
        return None;
    }

    let suggestions: Vec<ActivitySuggestion> =
        serde_json::from_str(&cleaned[start..=end]).ok()?;

    let suggestions: Vec<ActivitySuggestion> = suggestions
        .into_iter()
        .filter(|s| !s.title.trim().is_empty())
        .take(MAX_SUGGESTIONS)
        .collect();

    if suggestions.is_empty() {
        None
    } else {
        Some(suggestions)
    }
}

fn fallback_suggestions() -> Vec<ActivitySuggestion> {
    let canned = [
        ("Walk in a nearby park", "outdoor", 60),
        ("Board game evening at home", "indoor", 120),
        ("Cook a meal together", "indoor", 90),
        ("Visit a local museum", "indoor", 120),
    ];

    canned
        .iter()
        .map(|(title, setting, minutes)| ActivitySuggestion {
            title: title.to_string(),
            description: None,
            duration_minutes: Some(*minutes),
            setting: Some(setting.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedLlm {
        replies: Mutex<Vec<Result<String>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn request() -> DiscoveryRequest {
        DiscoveryRequest {
            interests: vec!["hiking".to_string()],
            core_values: vec!["Connection".to_string()],
            location_hint: None,
        }
    }

    const GOOD_REPLY: &str = r#"[{"title":"Forest hike","description":"Easy trail","duration_minutes":120,"setting":"outdoor"}]"#;

    #[tokio::test]
    async fn parses_first_reply_without_retry() {
        let llm = ScriptedLlm::new(vec![Ok(GOOD_REPLY.to_string())]);
        let use_case = ActivityDiscoveryUseCase::new(llm.clone());

        let outcome = use_case.execute(&request()).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Model);
        assert_eq!(outcome.suggestions[0].title, "Forest hike");
        assert_eq!(*llm.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn fenced_reply_still_parses() {
        let fenced = format!("```json\n{}\n```", GOOD_REPLY);
        let llm = ScriptedLlm::new(vec![Ok(fenced)]);
        let use_case = ActivityDiscoveryUseCase::new(llm);

        let outcome = use_case.execute(&request()).await.unwrap();
        assert_eq!(outcome.source, SuggestionSource::Model);
    }

    #[tokio::test]
    async fn unparseable_reply_triggers_one_retry() {
        let llm = ScriptedLlm::new(vec![
            Ok("Sure! Here are some ideas for you.".to_string()),
            Ok(GOOD_REPLY.to_string()),
        ]);
        let use_case = ActivityDiscoveryUseCase::new(llm.clone());

        let outcome = use_case.execute(&request()).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Model);
        assert_eq!(*llm.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn two_parse_failures_serve_fallback() {
        let llm = ScriptedLlm::new(vec![
            Ok("no json here".to_string()),
            Ok("still no json".to_string()),
        ]);
        let use_case = ActivityDiscoveryUseCase::new(llm);

        let outcome = use_case.execute(&request()).await.unwrap();

        assert_eq!(outcome.source, SuggestionSource::Fallback);
        assert!(!outcome.suggestions.is_empty());
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let llm = ScriptedLlm::new(vec![Err(AppError::LLMError("down".to_string()))]);
        let use_case = ActivityDiscoveryUseCase::new(llm);

        let err = use_case.execute(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
    }

    #[test]
    fn blank_titles_are_dropped() {
        let reply = r#"[{"title":"  "},{"title":"Picnic"}]"#;
        let suggestions = parse_suggestions(reply).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Picnic");
    }
}
