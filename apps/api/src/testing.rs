//! Deterministic stand-ins for the external collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::fetcher::{FetchError, PageFetcher};
use crate::llm_client::{LlmError, TextGenerator};

/// Scripted generator: answers by prompt marker, records every prompt it sees.
///
/// Rules are checked in insertion order; the first rule whose marker occurs in
/// the prompt decides the reply. Unmatched prompts get a numbered default reply.
#[derive(Default)]
pub struct ScriptedGenerator {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<String>>,
}

enum Reply {
    Text(String),
    Fail,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_when(mut self, marker: &str, text: &str) -> Self {
        self.rules.push((marker.to_string(), Reply::Text(text.to_string())));
        self
    }

    pub fn fail_when(mut self, marker: &str) -> Self {
        self.rules.push((marker.to_string(), Reply::Fail));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(prompt.to_string());
            calls.len()
        };

        for (marker, reply) in &self.rules {
            if prompt.contains(marker.as_str()) {
                return match reply {
                    Reply::Text(text) => Ok(text.clone()),
                    Reply::Fail => Err(LlmError::Api {
                        status: 529,
                        message: "overloaded".to_string(),
                    }),
                };
            }
        }

        Ok(format!("generated text #{n}"))
    }
}

/// Map-backed fetcher. Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| {
            FetchError::Command(fantoccini::error::CmdError::NotJson(format!(
                "net::ERR_NAME_NOT_RESOLVED for {url}"
            )))
        })
    }
}
