//! services/api/src/adapters/candidate_llm.rs
//!
//! This module contains the adapter for the generative backend that supplies
//! candidate activities and city-name completions. It implements the
//! `CandidateSource` port from the `core` crate over an OpenAI-compatible
//! chat-completions endpoint (Gemini by default).

const ACTIVITY_SYSTEM_INSTRUCTIONS: &str = r#"You are a travel planning assistant.
You answer ONLY with JSON: a bare array, no prose, no Markdown.
Every element is an object with exactly these string fields:
  "id", "name", "description", "type", "mapQuery"
and one array-of-strings field:
  "tags"
"mapQuery" is what a traveller would type into a map search to find the place."#;

const ACTIVITY_PROMPT_TEMPLATE: &str = r#"Generate a list of {count} interesting activities/places for a traveler visiting {destination}.
The traveler is interested in: {interests}.
Include a mix of "must-see" landmarks and hidden gems.
Each activity must have a descriptive name, a short compelling description, and tags."#;

const CITY_SYSTEM_INSTRUCTIONS: &str =
    "You complete city names. You answer ONLY with a JSON array of strings, no prose, no Markdown.";

const CITY_PROMPT_TEMPLATE: &str = r#"Suggest 5 real-world city names (City, Country) that match or start with "{input}". Return as a simple JSON string array."#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use trip_planner_core::{
    domain::{CandidateActivity, Interest},
    ports::{CandidateSource, PortError, PortResult},
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CandidateSource` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct LlmCandidateAdapter {
    client: Client<OpenAIConfig>,
    activity_model: String,
    suggestion_model: String,
    activity_count: usize,
}

impl LlmCandidateAdapter {
    /// Creates a new `LlmCandidateAdapter`.
    pub fn new(
        client: Client<OpenAIConfig>,
        activity_model: String,
        suggestion_model: String,
        activity_count: usize,
    ) -> Self {
        Self {
            client,
            activity_model,
            suggestion_model,
            activity_count,
        }
    }

    /// Sends one system + user exchange and returns the text of the first choice.
    async fn complete(&self, model: &str, system: &str, user: String) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // A missing choice or empty content is read as an empty array downstream.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

//=========================================================================================
// `CandidateSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl CandidateSource for LlmCandidateAdapter {
    async fn get_activities(
        &self,
        destination: &str,
        interests: &[Interest],
    ) -> PortResult<Vec<CandidateActivity>> {
        let prompt = activity_prompt(destination, interests, self.activity_count);
        info!("Requesting {} activities for {}.", self.activity_count, destination);

        let raw = self
            .complete(&self.activity_model, ACTIVITY_SYSTEM_INSTRUCTIONS, prompt)
            .await?;
        debug!("Raw activity response: {}", raw);
        parse_json_array(&raw)
    }

    async fn get_city_completions(&self, partial_input: &str) -> PortResult<Vec<String>> {
        let prompt = CITY_PROMPT_TEMPLATE.replace("{input}", partial_input);
        let raw = self
            .complete(&self.suggestion_model, CITY_SYSTEM_INSTRUCTIONS, prompt)
            .await?;
        parse_json_array(&raw)
    }
}

//=========================================================================================
// Prompt and Response Helpers
//=========================================================================================

pub fn activity_prompt(destination: &str, interests: &[Interest], count: usize) -> String {
    let interests = interests
        .iter()
        .map(|interest| interest.value())
        .collect::<Vec<_>>()
        .join(", ");
    ACTIVITY_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{destination}", destination)
        .replace("{interests}", &interests)
}

/// Removes a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> PortResult<String> {
    let fence = Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$")
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
    Ok(match fence.captures(text) {
        Some(captures) => captures[1].to_string(),
        None => text.trim().to_string(),
    })
}

/// Parses a model reply as a JSON array. The whole batch fails if any element is malformed.
pub fn parse_json_array<T: DeserializeOwned>(raw: &str) -> PortResult<Vec<T>> {
    let body = strip_code_fence(raw)?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&body).map_err(|e| PortError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_destination_interests_and_count() {
        let prompt = activity_prompt("Paris", &[Interest::Food, Interest::Art], 15);
        assert!(prompt.starts_with("Generate a list of 15 interesting activities/places"));
        assert!(prompt.contains("visiting Paris."));
        assert!(prompt.contains("interested in: food, art."));
    }

    #[test]
    fn parses_plain_and_fenced_activity_arrays() {
        let plain = r#"[{"id":"1","name":"Louvre","description":"Art","type":"museum","tags":["art"],"mapQuery":"Louvre"}]"#;
        let fenced = format!("```json\n{}\n```", plain);

        let a: Vec<CandidateActivity> = parse_json_array(plain).unwrap();
        let b: Vec<CandidateActivity> = parse_json_array(&fenced).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].id.as_deref(), Some("1"));
        assert_eq!(a[0].kind, "museum");
    }

    #[test]
    fn one_malformed_element_fails_the_batch() {
        let raw = r#"[{"name":"Louvre","description":"Art","type":"museum","tags":[],"mapQuery":"Louvre"},{"name":"Orsay"}]"#;
        let result: PortResult<Vec<CandidateActivity>> = parse_json_array(raw);
        assert!(matches!(result, Err(PortError::Malformed(_))));
    }

    #[test]
    fn empty_reply_is_an_empty_batch() {
        let cities: Vec<String> = parse_json_array("  ").unwrap();
        assert!(cities.is_empty());
    }

    #[test]
    fn parses_city_list() {
        let cities: Vec<String> = parse_json_array(r#"["Paris, France", "Paris, USA"]"#).unwrap();
        assert_eq!(cities, vec!["Paris, France", "Paris, USA"]);
    }
}
