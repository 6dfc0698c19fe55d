//! Gemini adapter for study-guide generation.
//!
//! Talks to the `generateContent` REST endpoint. Implements `TutorPort` with
//! a fixed tutor persona, an optional search-grounding tool for URL input,
//! and defensive parsing of the loosely-structured citation metadata.

use crate::adapters::ai::encoding::encode_image;
use crate::domain::{DomainError, StudyGuide, StudyRequest};
use crate::ports::TutorPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Fixed model. Not user-configurable.
const MODEL_ID: &str = "gemini-3-pro-preview";

/// Fixed sampling temperature. Low, for structured/educational output.
const TEMPERATURE: f32 = 0.4;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Shown when the model answers successfully but with no text at all.
pub const EMPTY_RESULT_FALLBACK: &str = "无法生成内容，请重试。";

/// Gemini REST adapter.
pub struct GeminiTutor {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiTutor {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the adapter at a different endpoint (local proxy, test server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// The tutor persona and output structure. Sent with every request.
    fn system_instruction() -> &'static str {
        r#"You are "OranjeStudie", an expert Dutch language tutor specifically designed for native Chinese speakers.
The user is learning at a CEFR A2 to B1 level.

Your goal is to analyze the provided input (Text, Image, or URL content) and generate a comprehensive, structured study guide in Markdown format.

**Rules for Content Generation:**
1.  **Audience:** All explanations must be in simplified Chinese (zh-CN). The tone should be encouraging, clear, and educational.
2.  **Level:** Focus on vocabulary and grammar suitable for A2-B1.
3.  **Formatting:** Use standard Markdown.
    *   Use **bold** for key Dutch vocabulary (A2/B1 level).
    *   Use *italics* for emphasis.
    *   Use > Blockquotes for translation notes.
4.  **Structure:**
    *   **# 学习摘要 (Summary):** A brief summary of the content in Chinese.
    *   **## 沉浸式阅读 (Immersion Reading):**
        *   If the input is text/article/sentences: Present the Dutch text line-by-line. Immediately below each Dutch line, provide the Chinese translation.
        *   Example:
            > Het is vandaag mooi weer.
            > 今天天气很好。
        *   If the input is an image of objects: List the items identified with their Dutch names (with article 'de'/'het') and Chinese translations.
    *   **## 重点词汇 (Key Vocabulary):** A table or list of 5-10 key words found in the content. Columns: Dutch Word (highlighted), Part of Speech, Chinese Meaning, Plural form (if noun).
    *   **## 语法解析 (Grammar Notes):** Explain 1-3 grammar points found in the text (e.g., Inversion, Separable verbs, Perfect tense) in Chinese.
    *   **## 练习 (Practice):** 2 short questions or a translation exercise based on the content to test understanding.

**Special Handling:**
*   If the input is a URL, read the content of the page and then perform the analysis.
*   If the input is an image, describe what is happening in the image in Dutch (A2/B1 level) in the "Immersion Reading" section, then analyze that text."#
    }

    /// URL heuristic driving the search tool: the trimmed text starts with
    /// `http://` or `https://`, has at least one character after the scheme,
    /// and contains no space and no `"` anywhere.
    ///
    /// Knowingly loose — free text that happens to start with a scheme and
    /// has no spaces also matches. Kept as-is rather than tightened, so URL
    /// input is never silently left ungrounded.
    fn looks_like_url(text: &str) -> bool {
        let trimmed = text.trim();
        let rest = match trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
        {
            Some(rest) => rest,
            None => return false,
        };
        !rest.is_empty() && !trimmed.contains(' ') && !trimmed.contains('"')
    }

    /// Assemble the user-turn parts. With an image: the encoded image first,
    /// then an instruction that carries the text as a context note when the
    /// user typed any. Without: the raw text as the sole part.
    fn build_parts(request: &StudyRequest) -> Vec<Part> {
        match &request.image {
            Some(image) => {
                let instruction = if request.text.is_empty() {
                    "Analyze this image and generate a Dutch study guide.".to_string()
                } else {
                    format!("Analyze this image. Context/User Note: {}", request.text)
                };
                vec![
                    Part::inline_data(&image.mime_type, encode_image(&image.data)),
                    Part::text(instruction),
                ]
            }
            None => vec![Part::text(request.text.clone())],
        }
    }

    fn build_request(request: &StudyRequest) -> GenerateContentRequest {
        let tools = if Self::looks_like_url(&request.text) {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: Self::build_parts(request),
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part::text(Self::system_instruction().to_string())],
            },
            tools,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }

    /// Turn a raw response into a guide. Empty model text becomes the fixed
    /// fallback string, never an error. Citation entries without a `web.uri`
    /// are skipped; order of the rest is preserved.
    fn extract_guide(response: GenerateContentResponse) -> StudyGuide {
        let candidate = response.candidates.into_iter().next();

        let markdown: String = candidate
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let markdown = if markdown.is_empty() {
            EMPTY_RESULT_FALLBACK.to_string()
        } else {
            markdown
        };

        let sources: Vec<String> = candidate
            .and_then(|c| c.grounding_metadata)
            .map(|meta| {
                meta.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web.and_then(|w| w.uri))
                    .collect()
            })
            .unwrap_or_default();

        StudyGuide { markdown, sources }
    }

    /// Pull a usable message out of an error body, which is itself untrusted.
    fn service_error_message(status: reqwest::StatusCode, body: &str) -> String {
        let from_body = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.trim().is_empty());
        match from_body {
            Some(message) => message,
            None => format!(
                "API error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ),
        }
    }
}

#[async_trait::async_trait]
impl TutorPort for GeminiTutor {
    async fn analyze(&self, request: &StudyRequest) -> Result<StudyGuide, DomainError> {
        let body = Self::build_request(request);
        info!(
            text_len = request.text.len(),
            has_image = request.image.is_some(),
            search_tool = !body.tools.is_empty(),
            "sending study request to Gemini"
        );

        let url = format!("{}/{}:generateContent?key={}", self.base_url, MODEL_ID, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Tutor(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Gemini API returned error");
            return Err(DomainError::Tutor(Self::service_error_message(status, &text)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Tutor(format!("Failed to parse API response: {}", e)))?;

        let guide = Self::extract_guide(parsed);
        debug!(
            markdown_len = guide.markdown.len(),
            sources = guide.sources.len(),
            "received study guide"
        );
        Ok(guide)
    }
}

/// `generateContent` request structure.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

/// One content part: text or inline binary, never both.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

/// Serializes to `{}` — the tool takes no parameters.
#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// `generateContent` response structure. Every field is optional/defaulted:
/// the shape is treated as an untrusted payload.
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// A single citation. Unknown variants (non-web chunks, junk fields)
/// deserialize to `web: None` and are skipped.
#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
}

/// Error body: `{"error": {"message": ...}}`.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageAttachment;

    #[test]
    fn url_heuristic_accepts_plain_urls() {
        assert!(GeminiTutor::looks_like_url("http://example.com"));
        assert!(GeminiTutor::looks_like_url("https://example.com/pad?x=1"));
        assert!(GeminiTutor::looks_like_url("  https://nos.nl/artikel  "));
    }

    #[test]
    fn url_heuristic_rejects_plain_text_and_malformed() {
        assert!(!GeminiTutor::looks_like_url("hello world"));
        assert!(!GeminiTutor::looks_like_url("http://"));
        assert!(!GeminiTutor::looks_like_url("http:// example.com"));
        assert!(!GeminiTutor::looks_like_url("http://a b"));
        assert!(!GeminiTutor::looks_like_url(r#"http://a"b"#));
        assert!(!GeminiTutor::looks_like_url("ftp://example.com"));
        assert!(!GeminiTutor::looks_like_url(""));
    }

    #[test]
    fn url_heuristic_is_knowingly_loose() {
        // Not a real URL, but matches the pattern; the tool is still enabled.
        assert!(GeminiTutor::looks_like_url("http://not-actually-a-page"));
    }

    #[test]
    fn search_tool_attached_only_for_url_input() {
        let url_req = GeminiTutor::build_request(&StudyRequest::text_only("http://example.com"));
        assert_eq!(url_req.tools.len(), 1);

        let text_req = GeminiTutor::build_request(&StudyRequest::text_only("hello world"));
        assert!(text_req.tools.is_empty());
    }

    #[test]
    fn tools_field_omitted_when_empty() {
        let req = GeminiTutor::build_request(&StudyRequest::text_only("hallo"));
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("tools").is_none());
        // f32 widens through serde_json; compare approximately.
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn search_tool_serializes_as_google_search() {
        let req = GeminiTutor::build_request(&StudyRequest::text_only("https://nos.nl"));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["tools"][0]["googleSearch"], serde_json::json!({}));
    }

    #[test]
    fn text_only_request_has_single_raw_text_part() {
        let parts = GeminiTutor::build_parts(&StudyRequest::text_only("  hallo wereld  "));
        assert_eq!(parts, vec![Part::text("  hallo wereld  ".to_string())]);
    }

    #[test]
    fn image_without_text_gets_generic_instruction() {
        let image = ImageAttachment::new(b"hello".to_vec(), "image/png", "x.png");
        let parts = GeminiTutor::build_parts(&StudyRequest::with_image("", image));

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], Part::inline_data("image/png", "aGVsbG8=".to_string()));
        assert_eq!(
            parts[1],
            Part::text("Analyze this image and generate a Dutch study guide.".to_string())
        );
    }

    #[test]
    fn image_with_text_gets_context_note() {
        let image = ImageAttachment::new(b"hello".to_vec(), "image/jpeg", "vogel.jpg");
        let parts = GeminiTutor::build_parts(&StudyRequest::with_image("bird", image));

        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            Part::text("Analyze this image. Context/User Note: bird".to_string())
        );
    }

    #[test]
    fn inline_data_serializes_camel_case() {
        let part = Part::inline_data("image/png", "QUJD".to_string());
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "QUJD");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn empty_model_text_becomes_fallback() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        )
        .unwrap();
        let guide = GeminiTutor::extract_guide(response);
        assert_eq!(guide.markdown, EMPTY_RESULT_FALLBACK);
        assert!(guide.sources.is_empty());
    }

    #[test]
    fn missing_candidates_becomes_fallback() {
        let guide = GeminiTutor::extract_guide(GenerateContentResponse::default());
        assert_eq!(guide.markdown, EMPTY_RESULT_FALLBACK);
    }

    #[test]
    fn multiple_text_parts_are_concatenated() {
        let response: GenerateContentResponse = serde_json::from_str(
            r##"{"candidates": [{"content": {"parts": [{"text": "# 学习摘要\n"}, {"text": "..."}]}}]}"##,
        )
        .unwrap();
        let guide = GeminiTutor::extract_guide(response);
        assert_eq!(guide.markdown, "# 学习摘要\n...");
    }

    #[test]
    fn malformed_citations_are_skipped_order_preserved() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
              "candidates": [{
                "content": {"parts": [{"text": "ok"}]},
                "groundingMetadata": {
                  "groundingChunks": [
                    {"web": {"uri": "https://a"}},
                    {"foo": 1},
                    {"web": {"title": "no uri"}},
                    {"web": {"uri": "https://b"}}
                  ]
                }
              }]
            }"#,
        )
        .unwrap();
        let guide = GeminiTutor::extract_guide(response);
        assert_eq!(guide.sources, vec!["https://a", "https://b"]);
    }

    #[test]
    fn missing_grounding_metadata_yields_no_sources() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#)
                .unwrap();
        let guide = GeminiTutor::extract_guide(response);
        assert!(guide.sources.is_empty());
    }

    #[test]
    fn service_error_message_prefers_body_message() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let msg =
            GeminiTutor::service_error_message(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(msg, "Resource has been exhausted");
    }

    #[test]
    fn service_error_message_falls_back_on_unreadable_body() {
        let msg = GeminiTutor::service_error_message(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>",
        );
        assert!(msg.starts_with("API error 500"));
        assert!(msg.contains("<html>oops</html>"));
    }
}
