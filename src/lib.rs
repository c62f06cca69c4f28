//! Food photo classification and nutrition tips backed by a hosted
//! generative model.
//!
//! `InferenceClient` sends a base64 JPEG with a dish-taxonomy prompt to
//! Gemini, asks for schema-constrained JSON and validates the answer into a
//! `FoodResult`.

pub mod ai;
pub mod error;
pub mod inference;
pub mod models;
pub mod prompts;
pub mod schema;

pub use error::{Error, InferenceError, Result};
pub use inference::{InferenceClient, FALLBACK_TIP};
pub use models::{Config, FoodResult, NutritionEstimate};
