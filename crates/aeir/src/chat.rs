//! Chat assistant backed by a hosted Gemini model.
//!
//! Requests run on a background thread so the UI never blocks on the
//! network; the session polls for replies once per frame.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use aeir_core::{ChatConfig, ChatMessage, LoadingState, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variables checked for an API key, in order.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Greeting shown when the chat opens.
pub const GREETING: &str =
    "Hi! I'm the AEIR digital assistant. How can I help you with drone services today?";

/// Instructions sent with every request.
const SYSTEM_INSTRUCTION: &str = "\
You are \"AEIR Bot\", an AI assistant for a professional drone cinematography \
website called AEIR. Your goal is to help potential clients (real estate agents, \
film directors, event planners) understand drone services.

Key Info about AEIR:
- Specializes in: FPV shots, Real Estate, Cinematic storytelling, Inspections.
- Location: Greece (Athens based, travels nationwide).
- Equipment: Latest DJI Mavic 3 Pro, Inspire 3, and custom FPV drones.
- Regulations: Fully licensed EASA Open & Specific category pilot.

Tone: Professional, artistic, helpful, and concise. Speak Greek by default unless \
addressed in English. If asked about specific prices, give ranges but insist they \
contact us via the form for a quote. Example range: Real estate simple video approx \
200€-400€, Full wedding coverage 500€+.";

/// Errors from the chat service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("chat service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("chat service returned no text")]
    EmptyResponse,
}

impl ChatError {
    /// Text shown in the transcript in place of a reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::MissingApiKey => {
                "The AI service is not available right now. Please check the API key."
            }
            ChatError::ServiceUnavailable(_) => {
                "Something went wrong while contacting the assistant. Please try again."
            }
            ChatError::EmptyResponse => "I couldn't come up with a reply.",
        }
    }
}

/// Sends a user message in the context of earlier turns and returns the reply.
pub trait ChatService: Send + 'static {
    fn send(&mut self, history: &[ChatMessage], text: &str) -> Result<String, ChatError>;
}

impl<F> ChatService for F
where
    F: FnMut(&[ChatMessage], &str) -> Result<String, ChatError> + Send + 'static,
{
    fn send(&mut self, history: &[ChatMessage], text: &str) -> Result<String, ChatError> {
        self(history, text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn new(role: Option<Role>, text: &str) -> Self {
        Self {
            role,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, ChatError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(ChatError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Debug)]
pub struct GeminiClient {
    agent: ureq::Agent,
    config: ChatConfig,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a client; the key comes from the config or the environment.
    pub fn new(config: &ChatConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_VARS
                    .iter()
                    .find_map(|var| std::env::var(var).ok())
                    .filter(|key| !key.trim().is_empty())
            });

        if api_key.is_none() {
            warn!("No chat API key configured");
        }

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();

        Self {
            agent,
            config: config.clone(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, history: &[ChatMessage], text: &str) -> GenerateRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|msg| Content::new(Some(msg.role), &msg.text))
            .collect();
        contents.push(Content::new(Some(Role::User), text));

        GenerateRequest {
            system_instruction: Content::new(None, SYSTEM_INSTRUCTION),
            contents,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        }
    }
}

impl ChatService for GeminiClient {
    fn send(&mut self, history: &[ChatMessage], text: &str) -> Result<String, ChatError> {
        let key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;
        let request = self.build_request(history, text);

        debug!(model = %self.config.model, turns = request.contents.len(), "Sending chat request");

        let response: GenerateResponse = self
            .agent
            .post(&self.endpoint())
            .header("x-goog-api-key", key)
            .send_json(&request)
            .map_err(|e| ChatError::ServiceUnavailable(format!("HTTP error: {e}")))?
            .body_mut()
            .read_json()
            .map_err(|e| ChatError::ServiceUnavailable(format!("JSON parse error: {e}")))?;

        response.into_text()
    }
}

/// Runs chat requests on a background thread.
#[derive(Debug)]
pub struct ChatWorker {
    requests: Sender<(Vec<ChatMessage>, String)>,
    replies: Receiver<Result<String, ChatError>>,
}

impl ChatWorker {
    /// Spawn a worker that owns `service`. The thread exits when the
    /// worker is dropped.
    pub fn spawn<S: ChatService>(mut service: S) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(Vec<ChatMessage>, String)>();
        let (reply_tx, reply_rx) = mpsc::channel();

        thread::spawn(move || {
            for (history, text) in request_rx {
                let reply = service.send(&history, &text);
                if reply_tx.send(reply).is_err() {
                    break;
                }
            }
            debug!("Chat worker stopped");
        });

        Self {
            requests: request_tx,
            replies: reply_rx,
        }
    }

    /// Queue a request. Returns `false` if the worker is gone.
    pub fn submit(&self, history: Vec<ChatMessage>, text: String) -> bool {
        self.requests.send((history, text)).is_ok()
    }

    /// Take a finished reply, if any.
    pub fn try_reply(&self) -> Option<Result<String, ChatError>> {
        match self.replies.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ChatError::ServiceUnavailable(
                "chat worker stopped".to_string(),
            ))),
        }
    }
}

/// Chat widget state: transcript, input line and request progress.
#[derive(Debug)]
pub struct ChatSession {
    open: bool,
    transcript: Vec<ChatMessage>,
    /// Completed exchanges sent as context with each request.
    history: Vec<ChatMessage>,
    pending: Option<ChatMessage>,
    input: String,
    state: LoadingState,
    next_id: u64,
    worker: ChatWorker,
}

impl ChatSession {
    pub fn new(worker: ChatWorker) -> Self {
        Self {
            open: false,
            transcript: vec![ChatMessage::new(0, Role::Model, GREETING)],
            history: Vec::new(),
            pending: None,
            input: String::new(),
            state: LoadingState::Idle,
            next_id: 1,
            worker,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadingState::Loading
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Send the current input. Ignored while a request is in flight or
    /// when the input is blank.
    pub fn send(&mut self) -> bool {
        if self.is_loading() || self.input.trim().is_empty() {
            return false;
        }

        let text = std::mem::take(&mut self.input);
        let message = ChatMessage::new(self.take_id(), Role::User, text.clone());
        self.transcript.push(message.clone());

        if self.worker.submit(self.history.clone(), text) {
            self.pending = Some(message);
            self.state = LoadingState::Loading;
        } else {
            self.fail(&ChatError::ServiceUnavailable("chat worker stopped".to_string()));
        }
        true
    }

    /// Apply a finished reply, if one has arrived.
    pub fn poll(&mut self) {
        if !self.is_loading() {
            return;
        }
        match self.worker.try_reply() {
            None => {}
            Some(Ok(text)) => {
                let reply = ChatMessage::new(self.take_id(), Role::Model, text);
                if let Some(question) = self.pending.take() {
                    self.history.push(question);
                    self.history.push(reply.clone());
                }
                self.transcript.push(reply);
                self.state = LoadingState::Success;
            }
            Some(Err(e)) => {
                warn!(error = %e, "Chat request failed");
                self.pending = None;
                self.fail(&e);
            }
        }
    }

    fn fail(&mut self, error: &ChatError) {
        let message = ChatMessage::new(self.take_id(), Role::Model, error.user_message());
        self.transcript.push(message);
        self.state = LoadingState::Error;
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
