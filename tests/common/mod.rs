// Fake collaborators for workflow tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ragchat::core::errors::AgentError;
use ragchat::{ChatMessage, DocumentIndex, Fragment, Settings, TextGenerator};

pub fn fragment(content: &str, source: &str) -> Fragment {
    Fragment::new(content, source, 0)
}

pub fn settings() -> Settings {
    Settings::default()
}

/// In-memory index fake. Results can be keyed per query; anything not
/// keyed falls back to the default result set.
pub struct FakeIndex {
    has_docs: bool,
    default_results: Vec<(Fragment, f32)>,
    per_query: HashMap<String, Vec<(Fragment, f32)>>,
    search_calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeIndex {
    pub fn empty() -> Self {
        Self {
            has_docs: false,
            default_results: Vec::new(),
            per_query: HashMap::new(),
            search_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(results: Vec<(Fragment, f32)>) -> Self {
        Self {
            has_docs: true,
            default_results: results,
            per_query: HashMap::new(),
            search_calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Non-empty index whose searches all come back empty.
    pub fn with_no_matches() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn keyed(mut self, query: &str, results: Vec<(Fragment, f32)>) -> Self {
        self.per_query.insert(query.to_string(), results);
        self
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentIndex for FakeIndex {
    async fn search_with_scores(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<(Fragment, f32)>, AgentError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        let results = self
            .per_query
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.clone());
        Ok(results.into_iter().take(k).collect())
    }

    fn has_documents(&self) -> bool {
        self.has_docs
    }
}

/// Index fake whose every search fails, as a collaborator outage would.
pub struct FailingIndex {
    message: String,
    search_calls: AtomicUsize,
}

impl FailingIndex {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentIndex for FailingIndex {
    async fn search_with_scores(
        &self,
        _query: &str,
        _k: usize,
    ) -> Result<Vec<(Fragment, f32)>, AgentError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::retrieval(&self.message))
    }

    fn has_documents(&self) -> bool {
        true
    }
}

/// Generator fake whose every call fails.
pub struct FailingLlm {
    message: String,
    pub calls: AtomicUsize,
}

impl FailingLlm {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FailingLlm {
    async fn generate(&self, _prompt: &str, _system: Option<&str>) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::generation(&self.message))
    }

    async fn generate_with_context(
        &self,
        _question: &str,
        _context: &str,
        _history: &[ChatMessage],
    ) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::generation(&self.message))
    }

    async fn generate_general(
        &self,
        _question: &str,
        _history: &[ChatMessage],
    ) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AgentError::generation(&self.message))
    }
}

/// Generator fake recording every call: (method, primary input, system).
pub struct FakeLlm {
    generate_reply: String,
    pub calls: Mutex<Vec<(String, String, Option<String>)>>,
}

impl FakeLlm {
    pub fn new() -> Self {
        Self::replying("rewritten question")
    }

    /// Set the text returned by `generate` (the rewrite / canned-prompt path).
    pub fn replying(reply: &str) -> Self {
        Self {
            generate_reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _, _)| method.clone())
            .collect()
    }

    pub fn calls_snapshot(&self) -> Vec<(String, String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeLlm {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push((
            "generate".to_string(),
            prompt.to_string(),
            system.map(String::from),
        ));
        Ok(self.generate_reply.clone())
    }

    async fn generate_with_context(
        &self,
        question: &str,
        context: &str,
        _history: &[ChatMessage],
    ) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push((
            "generate_with_context".to_string(),
            question.to_string(),
            Some(context.to_string()),
        ));
        Ok(format!("context answer: {}", question))
    }

    async fn generate_general(
        &self,
        question: &str,
        _history: &[ChatMessage],
    ) -> Result<String, AgentError> {
        self.calls.lock().unwrap().push((
            "generate_general".to_string(),
            question.to_string(),
            None,
        ));
        Ok(format!("general answer: {}", question))
    }
}
