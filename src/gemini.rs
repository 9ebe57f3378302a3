//! Image generation through the Gemini `generateContent` REST endpoint.

use futures_util::FutureExt;
use gloo::net::http::Request;
use serde::{Deserialize, Serialize};

use crate::app_router::GeneratorConfig;
use popcorn_saga_core::{Character, GenerationError, ImageGenerator, ImageRef, LocalBoxFuture};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Variant order matters for untagged decoding.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData", alias = "inline_data")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    #[allow(dead_code)]
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default, alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

pub(crate) struct GeminiGenerator {
    config: GeneratorConfig,
}

impl GeminiGenerator {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            String::from(js_sys::encode_uri_component(api_key))
        )
    }

    async fn request_image(&self, character: Character) -> Result<ImageRef, GenerationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(GenerationError::message("missing API key"));
        };
        let body = build_request(character);
        let request = Request::post(&self.endpoint(api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|err| GenerationError::message(err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| GenerationError::message(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|_| GenerationError::Unknown)?;
        image_from_response(status, &text)
    }
}

impl ImageGenerator for GeminiGenerator {
    fn generate(
        &self,
        character: Character,
    ) -> LocalBoxFuture<'_, Result<ImageRef, GenerationError>> {
        self.request_image(character).boxed_local()
    }
}

fn build_request(character: Character) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::Text {
                text: character.scene_prompt(),
            }],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE"],
        },
    }
}

fn image_from_response(status: u16, body: &str) -> Result<ImageRef, GenerationError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(GenerationError::message(message));
    }
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|_| GenerationError::Unknown)?;
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| match part {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => Some(
                ImageRef::from_base64(&inline_data.mime_type, &inline_data.data),
            ),
            _ => None,
        })
        .ok_or_else(|| GenerationError::message("no image data in response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_asks_for_image_modality() {
        let raw = serde_json::to_value(build_request(Character::Pizza)).unwrap();
        assert_eq!(raw["generationConfig"]["responseModalities"][0], "IMAGE");
        assert_eq!(raw["contents"][0]["role"], "user");
        let prompt = raw["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("pizza slice"));
    }

    #[test]
    fn inline_data_becomes_data_uri() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Here is your scene"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw0"}}
                    ]
                }
            }]
        }"#;
        let image = image_from_response(200, body).unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,iVBORw0");
    }

    #[test]
    fn text_only_response_is_reported() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#;
        assert_eq!(
            image_from_response(200, body),
            Err(GenerationError::Message("no image data in response".to_string()))
        );
    }

    #[test]
    fn api_error_message_is_surfaced() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = image_from_response(429, body).unwrap_err();
        assert_eq!(err.user_message(), "An error occurred: quota exceeded");
    }

    #[test]
    fn bare_http_failure_uses_status() {
        let err = image_from_response(503, "<html>unavailable</html>").unwrap_err();
        assert_eq!(err, GenerationError::Message("HTTP 503".to_string()));
    }

    #[test]
    fn garbage_success_body_is_unknown() {
        assert_eq!(
            image_from_response(200, "not json"),
            Err(GenerationError::Unknown)
        );
    }
}
