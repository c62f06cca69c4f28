//! Prompt templates and the dish taxonomy they are rendered with.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

pub const CLASSIFY_FOOD: &str = include_str!("../data/prompts/classify_food.txt");
pub const DAILY_TIP: &str = include_str!("../data/prompts/daily_tip.txt");
pub const DEFAULT_TAXONOMY: &str = include_str!("../data/taxonomy.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Dish names the model must choose from.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    dishes: Vec<String>,
}

impl Taxonomy {
    /// Parse one dish per line; blank lines and `#` comments are skipped.
    pub fn parse(source: &str) -> Result<Self> {
        let dishes: Vec<String> = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        if dishes.is_empty() {
            return Err(Error::Config("Food taxonomy contains no dishes".to_string()));
        }

        Ok(Self { dishes })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading food taxonomy from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Taxonomy compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_TAXONOMY)
    }

    /// Load from `path` when given, otherwise fall back to the embedded list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn dishes(&self) -> &[String] {
        &self.dishes
    }

    /// The classification prompt with this taxonomy filled in.
    pub fn classification_prompt(&self) -> String {
        let list = self
            .dishes
            .iter()
            .map(|dish| format!("- {}", dish))
            .collect::<Vec<_>>()
            .join("\n");
        render(CLASSIFY_FOOD, &[("dishes", &list)])
    }
}
