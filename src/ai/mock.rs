use super::ContentGenerator;
use crate::schema::Schema;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted `ContentGenerator` for tests.
///
/// Structured and text responses are replayed in order and cycle once
/// exhausted. `failing()` makes every call return a provider error.
/// Clones share their script and counters.
#[derive(Clone)]
pub struct MockContentGenerator {
    structured_responses: Arc<Mutex<Vec<String>>>,
    text_responses: Arc<Mutex<Vec<String>>>,
    fail: bool,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self {
            structured_responses: Arc::new(Mutex::new(Vec::new())),
            text_responses: Arc::new(Mutex::new(Vec::new())),
            fail: false,
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_structured_response(self, response: String) -> Self {
        self.structured_responses.lock().unwrap().push(response);
        self
    }

    pub fn with_text_response(self, response: String) -> Self {
        self.text_responses.lock().unwrap().push(response);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str, responses: &Mutex<Vec<String>>) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if self.fail {
            return Err(Error::AiProvider("mock generator failure".to_string()));
        }

        let responses = responses.lock().unwrap();
        if responses.is_empty() {
            Err(Error::EmptyResponse("mock generator has no responses".to_string()))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_structured(
        &self,
        _mime_type: &str,
        _image_base64: &str,
        prompt: &str,
        _schema: &Schema,
    ) -> Result<String> {
        self.next(prompt, &self.structured_responses)
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.next(prompt, &self.text_responses)
    }
}
