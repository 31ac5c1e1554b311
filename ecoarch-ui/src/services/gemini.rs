//! Gemini scoring client
//!
//! Two stateless operations against the Gemini generateContent API: a
//! location summary and the full sustainability analysis. The service is
//! rate limited and its output can drift from the requested schema, so
//! every failure is absorbed at this boundary: the summary falls back to a
//! fixed sentence and the analysis to a zero-score error result. Neither
//! call ever raises to the caller; a failed analysis is only recognizable
//! by its "Error" recommendation category.

use ecoarch_common::model::{AnalysisResult, BuildingDraft, RecommendationCategory};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const SUMMARY_MODEL: &str = "gemini-2.5-flash";
const ANALYSIS_MODEL: &str = "gemini-2.5-pro";
const USER_AGENT: &str = "EcoArchitect/0.1.0";
const RATE_LIMIT_MS: u64 = 1000; // free tier allowance, ~1 request per second

/// Approved sources restricting the model's evidence base
pub const AI_SOURCES: [&str; 7] = [
    "https://living-future.org/lbc/",
    "https://passivehouse.com/02_informations/01_whatisapassivehouse/01_whatisapassivehouse.htm",
    "https://www.usgbc.org/leed",
    "https://www.cemexventures.com/green-sustainable-architecture/",
    "https://www.barker-associates.co.uk/service/architecture/what-is-sustainable-architecture/",
    "https://www.aia.org/resource-center/putting-sustainability-into-practice",
    "https://www.gsa.gov/real-estate/design-and-construction/sustainability/sustainable-design",
];

/// Fallback location summary when the service cannot be reached
pub const LOCATION_SUMMARY_FALLBACK: &str = "Could not retrieve location-specific recommendations at this time. Please consider general best practices for your region.";

/// Diagnostic recommendations carried by a failed analysis
pub const ANALYSIS_ERROR_ITEMS: [&str; 2] = [
    "There was an error analyzing your building. Please try again.",
    "Ensure all fields are filled out correctly.",
];

/// Summary text carried by a failed analysis
pub const ANALYSIS_ERROR_SUMMARY: &str = "Could not complete analysis due to an error.";

/// Gemini client errors (absorbed before they reach callers)
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Non-conforming analysis: {0}")]
    NonConforming(String),
}

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// generateContent response body (only the fields we read)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Rate limiter keeping requests at most one per interval
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Gemini rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch a short climate and sustainability summary for a location.
    ///
    /// Best effort: any failure falls back to a fixed sentence instructing
    /// the user to rely on general best practices.
    pub async fn location_summary(&self, continent: &str, region: &str) -> String {
        let prompt = format!(
            "Based on general climate knowledge, provide a short summary of key weather \
             conditions and sustainability considerations for building projects in the \
             {region} region of {continent}. Mention factors like sun exposure for solar \
             panels, temperature extremes for insulation, and the importance of integrating \
             with public transportation if applicable. Keep it to one paragraph."
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: None,
        };

        match self.generate(SUMMARY_MODEL, &request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    continent = %continent,
                    region = %region,
                    error = %e,
                    "Location summary failed, using fallback"
                );
                LOCATION_SUMMARY_FALLBACK.to_string()
            }
        }
    }

    /// Run the full sustainability analysis for a draft.
    ///
    /// Requests strict JSON conforming to the `AnalysisResult` shape. Any
    /// failure (transport, HTTP error, empty candidate, malformed or
    /// out-of-range response) yields the zero-score error result instead.
    pub async fn analyze(&self, draft: &BuildingDraft) -> AnalysisResult {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_analysis_prompt(draft),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: analysis_response_schema(),
            }),
        };

        match self.request_analysis(&request).await {
            Ok(analysis) => {
                tracing::info!(
                    building_id = %draft.id,
                    score = analysis.sustainability_score,
                    categories = analysis.recommendations.len(),
                    "Sustainability analysis completed"
                );
                analysis
            }
            Err(e) => {
                tracing::error!(
                    building_id = %draft.id,
                    error = %e,
                    "Sustainability analysis failed, substituting error result"
                );
                failed_analysis()
            }
        }
    }

    async fn request_analysis(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<AnalysisResult, GeminiError> {
        let text = self.generate(ANALYSIS_MODEL, request).await?;

        let analysis: AnalysisResult =
            serde_json::from_str(&text).map_err(|e| GeminiError::Parse(e.to_string()))?;

        if analysis.sustainability_score > 100 {
            return Err(GeminiError::NonConforming(format!(
                "score {} out of range",
                analysis.sustainability_score
            )));
        }

        Ok(analysis)
    }

    /// Send one generateContent request and return the first candidate's text
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        // Rate limit
        self.rate_limiter.wait().await;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model = model, "Querying Gemini API");

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(GeminiError::EmptyResponse)
    }
}

/// The zero-score result saved in place of a failed analysis
pub fn failed_analysis() -> AnalysisResult {
    AnalysisResult {
        sustainability_score: 0,
        recommendations: vec![RecommendationCategory {
            category: "Error".to_string(),
            items: ANALYSIS_ERROR_ITEMS.iter().map(|s| s.to_string()).collect(),
        }],
        summary: ANALYSIS_ERROR_SUMMARY.to_string(),
    }
}

fn build_analysis_prompt(draft: &BuildingDraft) -> String {
    let list_or_none = |items: &[String]| {
        if items.is_empty() {
            "None specified".to_string()
        } else {
            items.join(", ")
        }
    };

    let additional = if draft.additional_considerations.is_empty() {
        "None"
    } else {
        &draft.additional_considerations
    };

    format!(
        "You are an expert sustainable architecture analyst. Your knowledge is strictly \
         limited to the following sources:\n{sources}\n\n\
         Do not use any other information. Analyze the following building plan and provide \
         a sustainability score and categorized recommendations.\n\n\
         Building Details:\n\
         - Building Name: {name}\n\
         - Location: {region}, {continent}\n\
         - Purpose: {purpose}\n\
         - Floors: {floors}\n\
         - Total Area: {area} sq ft\n\
         - Location Type: {location_type}\n\
         - Architectural Style: {style}\n\
         - Primary Materials: {materials}\n\
         - Waste Reduction: {waste}\n\
         - Energy Efficiency Measures: {energy}\n\
         - Resource Efficiency Measures: {resource}\n\
         - Water Usage Measures: {water}\n\
         - Additional Considerations: {additional}\n\n\
         Based *only* on the provided sources, return a JSON object with the specified \
         structure. The recommendations must be sorted into the four distinct categories \
         provided in the schema.",
        sources = AI_SOURCES.join("\n"),
        name = draft.name,
        region = draft.region,
        continent = draft.continent,
        purpose = draft.purpose.effective(),
        floors = draft.floors,
        area = draft.area,
        location_type = draft.location_type,
        style = draft.architectural_style,
        materials = draft.materials,
        waste = draft.waste_reduction,
        energy = list_or_none(&draft.energy_efficiency),
        resource = list_or_none(&draft.resource_efficiency),
        water = list_or_none(&draft.water_usage),
        additional = additional,
    )
}

/// Response schema forcing pure structured output from the model
fn analysis_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sustainabilityScore": {
                "type": "INTEGER",
                "description": "An integer score from 0 to 100 representing the building's eco-friendliness."
            },
            "recommendations": {
                "type": "ARRAY",
                "description": "A list of actionable recommendations, categorized for clarity.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "description": "The category of the recommendations (e.g., 'Energy Efficiency', 'Water Conservation', 'Materials & Resources', 'Site & Location')."
                        },
                        "items": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "A list of specific recommendations within this category."
                        }
                    },
                    "required": ["category", "items"]
                }
            },
            "summary": {
                "type": "STRING",
                "description": "A brief, one-paragraph summary of the building's sustainability profile."
            }
        },
        "required": ["sustainabilityScore", "recommendations", "summary"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoarch_common::model::Purpose;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test_key".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn prompt_resolves_other_purpose() {
        let mut draft = BuildingDraft::default();
        draft.purpose = Purpose::Other("Art Studio".to_string());

        let prompt = build_analysis_prompt(&draft);
        assert!(prompt.contains("- Purpose: Art Studio"));
        assert!(!prompt.contains("- Purpose: Other"));
    }

    #[test]
    fn prompt_embeds_all_sources_and_empty_lists() {
        let draft = BuildingDraft::default();
        let prompt = build_analysis_prompt(&draft);

        for source in AI_SOURCES {
            assert!(prompt.contains(source));
        }
        assert!(prompt.contains("Energy Efficiency Measures: None specified"));
        assert!(prompt.contains("Additional Considerations: None"));
    }

    #[test]
    fn schema_requires_all_top_level_fields() {
        let schema = analysis_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert_eq!(
            required,
            vec!["sustainabilityScore", "recommendations", "summary"]
        );
    }

    #[test]
    fn failed_analysis_has_sentinel_shape() {
        let analysis = failed_analysis();

        assert_eq!(analysis.sustainability_score, 0);
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.recommendations[0].category, "Error");
        assert_eq!(analysis.recommendations[0].items, ANALYSIS_ERROR_ITEMS);
        assert_eq!(analysis.summary, ANALYSIS_ERROR_SUMMARY);
    }

    #[test]
    fn response_text_extraction() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "{\"sustainabilityScore\":72}" } ] } }
            ]
        }"#;

        let body: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text);

        assert_eq!(text.as_deref(), Some("{\"sustainabilityScore\":72}"));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(50);

        let start = Instant::now();
        for _ in 0..3 {
            limiter.wait().await;
        }
        let elapsed = start.elapsed();

        // Two waits of ~50ms each
        assert!(elapsed >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn analyze_absorbs_transport_failure() {
        // Nothing listens on the discard port, so the request fails at
        // connect time and the client must degrade to the error result
        let mut draft = BuildingDraft::default();
        draft.name = "Eco-Home".to_string();

        let client = GeminiClient::new("test_key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let analysis = client.analyze(&draft).await;
        assert_eq!(analysis, failed_analysis());
    }

    #[tokio::test]
    async fn location_summary_falls_back_on_transport_failure() {
        let client = GeminiClient::new("test_key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let summary = client.location_summary("Europe", "North").await;
        assert_eq!(summary, LOCATION_SUMMARY_FALLBACK);
    }
}
