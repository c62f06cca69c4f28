//! Food classification and daily tips on top of a `ContentGenerator`.

use crate::ai::mime::JPEG;
use crate::ai::{ContentGenerator, GeminiGenerator};
use crate::error::InferenceError;
use crate::models::{Config, FoodResponse, FoodResult, NutritionEstimate, NutritionResponse};
use crate::prompts::{self, Taxonomy};
use crate::schema::{food_result_schema, Schema};
use crate::Result;
use tracing::{error, info, warn};

pub const FALLBACK_TIP: &str = "Stay hydrated by drinking plenty of water throughout the day!";

pub struct InferenceClient {
    generator: Box<dyn ContentGenerator>,
    classify_prompt: String,
    schema: Schema,
}

impl InferenceClient {
    pub fn new(generator: Box<dyn ContentGenerator>, taxonomy: &Taxonomy) -> Self {
        Self {
            generator,
            classify_prompt: taxonomy.classification_prompt(),
            schema: food_result_schema(),
        }
    }

    /// Build a Gemini-backed client, loading the taxonomy named by the config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = Taxonomy::load(config.taxonomy_path.as_deref())?;
        info!(
            "Using Gemini model {} with {} dishes in taxonomy",
            config.model,
            taxonomy.dishes().len()
        );

        Ok(Self::new(
            Box::new(GeminiGenerator::from_config(config)),
            &taxonomy,
        ))
    }

    /// Identify the dish in a base64 JPEG and estimate its nutrition.
    pub async fn classify_food(
        &self,
        image_base64: &str,
    ) -> std::result::Result<FoodResult, InferenceError> {
        let outcome = match self
            .generator
            .generate_structured(JPEG, image_base64, &self.classify_prompt, &self.schema)
            .await
        {
            Ok(text) => parse_food_response(&text),
            Err(e) => Err(InferenceError::from(e)),
        };

        match outcome {
            Ok(result) => {
                info!(
                    "Classified food as '{}' ({}, {} kcal)",
                    result.name, result.portion_size, result.nutrition.calories
                );
                Ok(result)
            }
            Err(e) => {
                error!("Food classification failed: {:?}", e);
                Err(e)
            }
        }
    }

    /// Short healthy-eating tip. Never fails: any error yields `FALLBACK_TIP`.
    pub async fn get_daily_tip(&self) -> String {
        match self.generator.generate_text(prompts::DAILY_TIP).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Daily tip response was blank, using fallback tip");
                FALLBACK_TIP.to_string()
            }
            Err(e) => {
                warn!("Failed to fetch daily tip, using fallback tip: {}", e);
                FALLBACK_TIP.to_string()
            }
        }
    }
}

/// Validate the model's JSON answer into a `FoodResult`.
pub fn parse_food_response(text: &str) -> std::result::Result<FoodResult, InferenceError> {
    let json = strip_code_fence(text);

    let response: FoodResponse = serde_json::from_str(json).map_err(|e| {
        InferenceError::MalformedResponse(format!("Invalid JSON from model: {}: {}", e, text))
    })?;

    if let Some(message) = response.error.as_deref().map(str::trim) {
        if !message.is_empty() {
            return Err(InferenceError::UnrecognizedContent(message.to_string()));
        }
    }

    let name = response
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| InferenceError::MalformedResponse("Response has no name".to_string()))?;

    let nutrition = response
        .nutrition
        .as_ref()
        .ok_or_else(|| InferenceError::MalformedResponse("Response has no nutrition".to_string()))
        .and_then(validate_nutrition)?;

    Ok(FoodResult {
        name: name.to_string(),
        portion_size: response
            .portion_size
            .map(|p| p.trim().to_string())
            .unwrap_or_default(),
        nutrition,
        error: None,
    })
}

fn validate_nutrition(
    raw: &NutritionResponse,
) -> std::result::Result<NutritionEstimate, InferenceError> {
    let field = |name: &str, value: Option<f64>| match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(InferenceError::MalformedResponse(format!(
            "Nutrition field {} is out of range: {}",
            name, v
        ))),
        None => Err(InferenceError::MalformedResponse(format!(
            "Nutrition field {} is missing",
            name
        ))),
    };

    Ok(NutritionEstimate {
        calories: field("calories", raw.calories)?,
        protein: field("protein", raw.protein)?,
        carbs: field("carbs", raw.carbs)?,
        fat: field("fat", raw.fat)?,
    })
}

/// Remove surrounding whitespace and a Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop the info string (e.g. `json`) right after the opening fence.
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockContentGenerator;
    use crate::error::{MALFORMED_RESPONSE_MESSAGE, REMOTE_CALL_MESSAGE};
    use pretty_assertions::assert_eq;

    const EMPANADAS: &str = r#"{
        "name": "Empanada de carne",
        "portionSize": "2 units",
        "nutrition": { "calories": 580, "protein": 24, "carbs": 50, "fat": 30 }
    }"#;

    fn client_with(generator: MockContentGenerator) -> InferenceClient {
        InferenceClient::new(Box::new(generator), &Taxonomy::embedded().unwrap())
    }

    #[test]
    fn test_parse_valid_response() {
        let result = parse_food_response(EMPANADAS).unwrap();
        assert_eq!(
            result,
            FoodResult {
                name: "Empanada de carne".to_string(),
                portion_size: "2 units".to_string(),
                nutrition: NutritionEstimate {
                    calories: 580.0,
                    protein: 24.0,
                    carbs: 50.0,
                    fat: 30.0,
                },
                error: None,
            }
        );
    }

    #[test]
    fn test_parse_error_field_is_unrecognized_content() {
        let err = parse_food_response(r#"{"error": "No food detected in the image"}"#).unwrap_err();
        assert_eq!(
            err,
            InferenceError::UnrecognizedContent("No food detected in the image".to_string())
        );
        assert_eq!(err.to_string(), "No food detected in the image");
    }

    #[test]
    fn test_parse_error_wins_over_dish_fields() {
        let err = parse_food_response(
            r#"{"error": "Not food", "name": "Asado",
                "nutrition": {"calories": 1, "protein": 1, "carbs": 1, "fat": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InferenceError::UnrecognizedContent(_)));
    }

    #[test]
    fn test_parse_blank_error_is_ignored() {
        let text = EMPANADAS.replacen('{', r#"{"error": "  ","#, 1);
        let result = parse_food_response(&text).unwrap();
        assert_eq!(result.name, "Empanada de carne");
    }

    #[test]
    fn test_parse_missing_name_or_nutrition() {
        let err = parse_food_response(
            r#"{"portionSize": "1 plate",
                "nutrition": {"calories": 1, "protein": 1, "carbs": 1, "fat": 1}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), MALFORMED_RESPONSE_MESSAGE);

        let err = parse_food_response(r#"{"name": "Locro", "portionSize": "1 bowl"}"#).unwrap_err();
        assert_eq!(err.to_string(), MALFORMED_RESPONSE_MESSAGE);

        let err = parse_food_response(
            r#"{"name": "   ", "nutrition": {"calories": 1, "protein": 1, "carbs": 1, "fat": 1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_incomplete_or_negative_nutrition() {
        let err = parse_food_response(
            r#"{"name": "Locro", "nutrition": {"calories": 400, "protein": 20, "carbs": 40}}"#,
        )
        .unwrap_err();
        assert!(err.detail().contains("fat"));

        let err = parse_food_response(
            r#"{"name": "Locro", "nutrition": {"calories": -5, "protein": 20, "carbs": 40, "fat": 10}}"#,
        )
        .unwrap_err();
        assert!(err.detail().contains("calories"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_food_response("I think this is a pizza").unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_missing_portion_defaults_to_empty() {
        let result = parse_food_response(
            r#"{"name": "Chipá", "nutrition": {"calories": 90, "protein": 3, "carbs": 10, "fat": 4}}"#,
        )
        .unwrap();
        assert_eq!(result.portion_size, "");
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let fenced = format!("```json\n{}\n```", EMPANADAS);
        assert_eq!(parse_food_response(&fenced).unwrap().name, "Empanada de carne");
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{}```"), "{}");
        assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
        assert_eq!(
            strip_code_fence("```{\"a\":1,\n\"b\":2}\n```"),
            "{\"a\":1,\n\"b\":2}"
        );
    }

    #[test]
    fn test_parse_fenced_json_without_newlines() {
        let single_line = r#"```json {"name":"Locro","portionSize":"1 bowl","nutrition":{"calories":520,"protein":25,"carbs":55,"fat":22}}```"#;
        assert_eq!(parse_food_response(single_line).unwrap().name, "Locro");

        let opening_line = "```{\"name\":\"Locro\",\n\"nutrition\":{\"calories\":520,\"protein\":25,\"carbs\":55,\"fat\":22}}\n```";
        let result = parse_food_response(opening_line).unwrap();
        assert_eq!(result.name, "Locro");
        assert_eq!(result.nutrition.calories, 520.0);
    }

    #[tokio::test]
    async fn test_classify_food_success() {
        let generator = MockContentGenerator::new().with_structured_response(EMPANADAS.to_string());
        let client = client_with(generator);

        let result = client.classify_food("AAAA").await.unwrap();
        assert_eq!(result.name, "Empanada de carne");
        assert_eq!(result.portion_size, "2 units");
    }

    #[tokio::test]
    async fn test_classify_food_sends_taxonomy_prompt() {
        let generator = MockContentGenerator::new().with_structured_response(EMPANADAS.to_string());
        let taxonomy = Taxonomy::parse("Empanada de carne\nLocro").unwrap();
        let client = InferenceClient::new(Box::new(generator.clone()), &taxonomy);

        client.classify_food("AAAA").await.unwrap();

        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("- Empanada de carne\n- Locro"));
        assert_eq!(generator.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_classify_food_transport_failure() {
        let client = client_with(MockContentGenerator::new().failing());

        let err = client.classify_food("AAAA").await.unwrap_err();
        assert!(matches!(err, InferenceError::RemoteCall(_)));
        assert_eq!(err.to_string(), REMOTE_CALL_MESSAGE);
    }

    #[tokio::test]
    async fn test_classify_food_empty_response_is_malformed() {
        let client = client_with(MockContentGenerator::new());

        let err = client.classify_food("AAAA").await.unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_daily_tip_returns_trimmed_text() {
        let generator = MockContentGenerator::new()
            .with_text_response("  Add a portion of vegetables to lunch.\n".to_string());
        let client = client_with(generator);

        assert_eq!(
            client.get_daily_tip().await,
            "Add a portion of vegetables to lunch."
        );
    }

    #[tokio::test]
    async fn test_daily_tip_falls_back_on_failure() {
        let client = client_with(MockContentGenerator::new().failing());
        assert_eq!(client.get_daily_tip().await, FALLBACK_TIP);
    }

    #[tokio::test]
    async fn test_daily_tip_falls_back_on_blank_text() {
        let client = client_with(MockContentGenerator::new().with_text_response("   ".to_string()));
        assert_eq!(client.get_daily_tip().await, FALLBACK_TIP);
    }
}
