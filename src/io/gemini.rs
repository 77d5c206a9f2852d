//! Client for the Gemini `generateContent` endpoint, used as an opaque
//! image-to-image enhancer: one inline image plus an instruction in, one
//! inline image out. Single attempt, no retry, no streaming.
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::core::datauri::DataUri;
use crate::core::params::EnhanceConfig;
use crate::error::{Error, Result};
use crate::types::Resolution;

use super::Enhancer;

/// Instruction sent alongside the image.
pub fn enhancement_prompt(resolution: Resolution) -> String {
    format!(
        "Enhance this low-quality photo to a high-quality, crisp {} image. Improve details, sharpness, and color vibrancy without altering the original composition or subject matter.",
        resolution
    )
}

/// JSON body for a single image-modality request.
pub fn build_request_body(image: &DataUri, resolution: Resolution) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": image.mime_type(),
                        "data": image.data(),
                    }
                },
                { "text": enhancement_prompt(resolution) }
            ]
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE"]
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub inline_data: Option<InlineData>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Pull the first inline image out of the first candidate.
///
/// When there is none, the error carries whatever explanation the service
/// gave: a prompt block reason, the candidate's finish reason, or the start
/// of a text reply.
pub fn extract_image(response: GenerateContentResponse) -> Result<DataUri> {
    let block_reason = response
        .prompt_feedback
        .and_then(|f| f.block_reason)
        .map(|r| format!("prompt blocked: {r}"));

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(Error::NoImageData {
            detail: block_reason,
        });
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let mut reply_text = None;
    for part in parts {
        if let Some(inline) = part.inline_data {
            trace!("Found inline {} part", inline.mime_type);
            return Ok(DataUri::from_base64(inline.mime_type, inline.data));
        }
        if reply_text.is_none() {
            reply_text = part.text.filter(|t| !t.trim().is_empty());
        }
    }

    let detail = block_reason
        .or_else(|| {
            candidate
                .finish_reason
                .filter(|r| r != "STOP")
                .map(|r| format!("finish reason: {r}"))
        })
        .or_else(|| reply_text.map(|t| format!("model replied: {}", truncate(&t, 160))));
    Err(Error::NoImageData { detail })
}

/// Best-effort message from an error body (`{"error": {"message": ...}}`).
pub fn service_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => match (error.status, error.message) {
            (Some(status), Some(message)) => format!("{status}: {message}"),
            (None, Some(message)) => message,
            (Some(status), None) => status,
            (None, None) => "no details".to_string(),
        },
        Err(_) if body.trim().is_empty() => "no details".to_string(),
        Err(_) => truncate(body.trim(), 200),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}…")
}

pub struct GeminiClient {
    http: Client,
    config: EnhanceConfig,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

impl GeminiClient {
    /// Build a client. Fails with [`Error::MissingApiKey`] when no key is configured.
    pub fn new(config: EnhanceConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(Error::MissingApiKey)?;
        let http = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()?;
        debug!(
            "Gemini client ready (model={}, endpoint={})",
            config.model, config.endpoint
        );
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// Enhance an image given in textual data-URI form. The URI is parsed
    /// before anything is sent, so malformed input never reaches the network.
    pub fn enhance_data_uri(&self, data_uri: &str, resolution: Resolution) -> Result<DataUri> {
        let image = DataUri::parse(data_uri)?;
        self.enhance(&image, resolution)
    }
}

impl Enhancer for GeminiClient {
    fn enhance(&self, image: &DataUri, resolution: Resolution) -> Result<DataUri> {
        let url = self.config.generate_url();
        info!(
            "Requesting {} enhancement from {} ({} KB {})",
            resolution,
            self.config.model,
            image.payload_len() / 1024,
            image.mime_type()
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request_body(image, resolution))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                message: service_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response.json()?;
        let enhanced = extract_image(parsed)?;
        info!(
            "Received enhanced image ({} KB {})",
            enhanced.payload_len() / 1024,
            enhanced.mime_type()
        );
        Ok(enhanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_carries_image_prompt_and_modality() {
        let image = DataUri::encode("image/jpeg", b"pixels");
        let body = build_request_body(&image, Resolution::P1080);

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], image.data());
        assert!(parts[1]["text"].as_str().unwrap().contains("crisp 1080p image"));
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn extracts_first_image_part() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "second" } }
                ]},
                "finishReason": "STOP"
            }]
        }));
        let image = extract_image(response).unwrap();
        assert_eq!(image.to_string(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn empty_response_is_an_error() {
        let err = extract_image(parse(json!({}))).unwrap_err();
        assert!(matches!(err, Error::NoImageData { detail: None }));
    }

    #[test]
    fn refusal_reports_the_reason() {
        let err = extract_image(parse(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No image data found in the API response (prompt blocked: SAFETY)"
        );

        let err = extract_image(parse(json!({
            "candidates": [{ "finishReason": "IMAGE_SAFETY" }]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("finish reason: IMAGE_SAFETY"));

        let err = extract_image(parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't edit photos of people." }] },
                "finishReason": "STOP"
            }]
        })))
        .unwrap_err();
        assert!(err.to_string().contains("model replied: I can't edit photos of people."));
    }

    #[test]
    fn service_error_body_is_summarized() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(service_error_message(body), "RESOURCE_EXHAUSTED: Quota exceeded");
        assert_eq!(service_error_message(""), "no details");
        assert_eq!(service_error_message("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn client_requires_api_key() {
        let err = GeminiClient::new(EnhanceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn malformed_uri_fails_before_any_request() {
        // Port 9 (discard) on loopback: the request would fail if it were ever sent.
        let config = EnhanceConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let client = GeminiClient::new(config).unwrap();

        let err = client
            .enhance_data_uri("data:image/png;base64", Resolution::P720)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDataUri { .. }));

        let err = client
            .enhance_data_uri("not-a-uri,AAAA", Resolution::P720)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDataUri { .. }));
    }
}
