//! Gemini `generateContent` client

use super::{CatalogClient, CatalogResult};
use crate::config::Config;
use crate::error::CatalogError;
use crate::types::{Book, Chapter};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

const CATALOG_PROMPT: &str = "Generate a diverse list of 10 fictional books. For each book, provide a unique ID, title, author, a simple descriptive prompt for a cover image, category (e.g., 'Science Fiction', 'Mystery', 'Fantasy', 'Non-Fiction'), and a one-paragraph summary.";

/// Client for the Gemini generative language API
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from configuration
    ///
    /// A missing API key is not an error here; it surfaces when a fetch is
    /// attempted, before any request is sent.
    pub fn new(config: &Config) -> CatalogResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CatalogError::RemoteCall(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Run one structured generation and return the raw JSON text
    async fn generate(&self, prompt: &str, item_schema: Value) -> CatalogResult<String> {
        let api_key = self.api_key.as_deref().ok_or(CatalogError::MissingCredential)?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "ARRAY", "items": item_schema },
            },
        });

        tracing::debug!("POST {}", self.endpoint());
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CatalogError::RemoteCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CatalogError::RemoteCall(format!(
                "API returned {}: {}",
                status,
                detail.trim()
            )));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::MalformedResponse(e.to_string()))?;

        envelope.text().ok_or_else(|| {
            CatalogError::MalformedResponse("response contained no candidate text".to_string())
        })
    }
}

#[async_trait]
impl CatalogClient for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_catalog(&self) -> CatalogResult<Vec<Book>> {
        let text = self.generate(CATALOG_PROMPT, book_schema()).await?;
        parse_catalog(&text)
    }

    async fn fetch_chapters(&self, book: &Book) -> CatalogResult<Vec<Chapter>> {
        let prompt = chapter_prompt(book);
        let text = self.generate(&prompt, chapter_schema()).await?;
        parse_chapters(&text)
    }
}

fn chapter_prompt(book: &Book) -> String {
    format!(
        "Generate two substantial chapters for a fictional book titled '{}' by {}. The book's summary is: '{}'. Each chapter should be at least 500 words long and have a title. Format the content with standard newline characters for paragraph breaks.",
        book.title,
        book.author,
        book.summary().unwrap_or_default()
    )
}

fn book_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING", "description": "A unique identifier for the book, e.g., '978-0321765723'" },
            "title": { "type": "STRING", "description": "The title of the book." },
            "author": { "type": "STRING", "description": "The author of the book." },
            "coverImagePrompt": { "type": "STRING", "description": "A brief, descriptive prompt for generating a cover image" },
            "category": { "type": "STRING", "description": "The genre or category of the book, e.g., 'Science Fiction', 'Classic Literature', 'Technology'" },
            "summary": { "type": "STRING", "description": "A one-paragraph summary of the book's plot or main ideas." },
        },
        "required": ["id", "title", "author", "coverImagePrompt", "category", "summary"],
    })
}

fn chapter_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "The title of the chapter." },
            "content": { "type": "STRING", "description": "The full text content of the chapter, at least 500 words long. Use standard newline characters for paragraph breaks." },
        },
        "required": ["title", "content"],
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Wire shape of one catalog entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    id: String,
    title: String,
    author: String,
    #[serde(alias = "coverPrompt")]
    cover_image_prompt: String,
    category: String,
    summary: String,
}

impl From<CatalogEntry> for Book {
    fn from(entry: CatalogEntry) -> Self {
        Book::remote(
            entry.id,
            entry.title,
            entry.author,
            entry.category,
            entry.summary,
            entry.cover_image_prompt,
        )
    }
}

/// Parse the JSON text into a top-level array of values
fn parse_array(text: &str) -> CatalogResult<Vec<Value>> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| CatalogError::MalformedResponse(format!("invalid JSON: {}", e)))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CatalogError::MalformedResponse(format!(
            "expected an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse generated catalog text into remote book records
pub fn parse_catalog(text: &str) -> CatalogResult<Vec<Book>> {
    parse_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<CatalogEntry>(item)
                .map(Book::from)
                .map_err(|e| {
                    CatalogError::MalformedResponse(format!("catalog entry {}: {}", index, e))
                })
        })
        .collect()
}

/// Parse generated chapter text; an empty list is rejected
pub fn parse_chapters(text: &str) -> CatalogResult<Vec<Chapter>> {
    let chapters = parse_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Chapter>(item)
                .map_err(|e| CatalogError::MalformedResponse(format!("chapter {}: {}", index, e)))
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    if chapters.is_empty() {
        return Err(CatalogError::MalformedResponse(
            "response contained no chapters".to_string(),
        ));
    }
    Ok(chapters)
}
