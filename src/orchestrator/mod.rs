//! Orchestration operations and the provider cascade
//!
//! Every structured operation runs the same sequential policy: try the
//! primary provider, on any failure try the secondary, on exhaustion return
//! the operation's fixed fallback value. Attempts are never raced; a failed
//! attempt is the trigger for the next one, so an operation makes at most
//! two outbound requests.
//!
//! The layer is stateless. Callers pass the full domain snapshot into every
//! call and apply the returned values themselves; nothing here mutates
//! agents, tasks, memories, or notes.

mod fallback;
mod parse;
mod schemas;

use std::sync::Arc;

use eyre::Result;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{
    Agent, CalendarNote, ChatTurn, MemoryEntry, NotesByDate, OrchestrationResponse, Stage, Suggestion, Task,
};
use crate::llm::{GeminiClient, LlmError, OpenAIClient, Provider, SchemaDescriptor, StreamChunk};
use crate::prompts::PromptLibrary;

/// Which provider produced an operation's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Primary,
    Secondary,
    /// Every configured provider failed; the value is the fixed fallback
    Fallback,
}

/// An operation result tagged with how it was obtained
///
/// Callers that only want the value read `.value`; tests and the console
/// status line read `.route` to distinguish "succeeded via secondary" from
/// "exhausted to fallback" without scraping logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub route: Route,
}

impl<T> Outcome<T> {
    fn primary(value: T) -> Self {
        Self { value, route: Route::Primary }
    }

    fn secondary(value: T) -> Self {
        Self { value, route: Route::Secondary }
    }

    fn fallback(value: T) -> Self {
        Self { value, route: Route::Fallback }
    }
}

/// The orchestration layer: two optional providers plus the prompt library
pub struct Orchestrator {
    primary: Option<Arc<dyn Provider>>,
    secondary: Option<Arc<dyn Provider>>,
    prompts: PromptLibrary,
}

impl Orchestrator {
    /// Build with explicit providers (tests inject mocks here)
    pub fn new(primary: Option<Arc<dyn Provider>>, secondary: Option<Arc<dyn Provider>>) -> Result<Self> {
        let prompts = PromptLibrary::new()?;
        Ok(Self { primary, secondary, prompts })
    }

    /// Resolve providers from configuration once, at startup
    ///
    /// A missing credential disables that provider for the whole process;
    /// it is logged here, once, rather than on every call.
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary: Option<Arc<dyn Provider>> = match config.gemini.resolve() {
            Ok(resolved) => Some(Arc::new(GeminiClient::from_config(&resolved)?)),
            Err(err) => {
                warn!("Orchestrator::from_config: primary disabled: {err}");
                None
            }
        };
        let secondary: Option<Arc<dyn Provider>> = match config.openai.resolve() {
            Ok(resolved) => Some(Arc::new(OpenAIClient::from_config(&resolved)?)),
            Err(err) => {
                warn!("Orchestrator::from_config: secondary disabled: {err}");
                None
            }
        };
        info!(
            primary = primary.is_some(),
            secondary = secondary.is_some(),
            "Orchestrator::from_config: providers resolved"
        );
        Self::new(primary, secondary)
    }

    /// Sequential provider cascade shared by every structured operation
    async fn cascade<T, F>(&self, op: &'static str, prompt: &str, schema: &SchemaDescriptor, parse: F, fallback: T) -> Outcome<T>
    where
        F: Fn(Value) -> Result<T, LlmError>,
    {
        if let Some(provider) = &self.primary {
            match self.attempt(provider.as_ref(), prompt, schema, &parse).await {
                Ok(value) => {
                    debug!(op, provider = provider.name(), "cascade: primary succeeded");
                    return Outcome::primary(value);
                }
                Err(err) => {
                    warn!(op, provider = provider.name(), "cascade: primary failed: {err}");
                }
            }
        }
        if let Some(provider) = &self.secondary {
            match self.attempt(provider.as_ref(), prompt, schema, &parse).await {
                Ok(value) => {
                    debug!(op, provider = provider.name(), "cascade: secondary succeeded");
                    return Outcome::secondary(value);
                }
                Err(err) => {
                    warn!(op, provider = provider.name(), "cascade: secondary failed: {err}");
                }
            }
        }
        error!(op, "cascade: all providers exhausted, using fallback");
        Outcome::fallback(fallback)
    }

    async fn attempt<T, F>(&self, provider: &dyn Provider, prompt: &str, schema: &SchemaDescriptor, parse: &F) -> Result<T, LlmError>
    where
        F: Fn(Value) -> Result<T, LlmError>,
    {
        let payload = provider.generate_structured(prompt, schema).await?;
        parse(payload)
    }

    /// Seed the board with starting tasks for the whole crew
    ///
    /// Ids and the Backlog stage are assigned locally; whatever the provider
    /// claimed for either is discarded.
    pub async fn generate_initial_tasks(&self, agents: &[Agent]) -> Outcome<Vec<Task>> {
        let prompt = match self.prompts.initial_tasks(agents) {
            Ok(p) => p,
            Err(err) => {
                error!("generate_initial_tasks: prompt render failed: {err}");
                return Outcome::fallback(Vec::new());
            }
        };
        let schema = schemas::initial_tasks(agents);
        let outcome = self
            .cascade("initial_tasks", &prompt, &schema, parse::task_drafts, fallback::initial_tasks())
            .await;
        Outcome {
            value: outcome
                .value
                .into_iter()
                .map(|d| Task::new(d.content, d.agent_name))
                .collect(),
            route: outcome.route,
        }
    }

    /// Advise on ownership after a task changed stage
    pub async fn get_handoff_suggestion(
        &self,
        task: &Task,
        source: Stage,
        destination: Stage,
        agents: &[Agent],
        memories: &[MemoryEntry],
    ) -> Outcome<Option<Suggestion>> {
        let prompt = match self.prompts.handoff(task, source, destination, agents, memories) {
            Ok(p) => p,
            Err(err) => {
                error!("get_handoff_suggestion: prompt render failed: {err}");
                return Outcome::fallback(fallback::handoff());
            }
        };
        let schema = schemas::handoff(agents);
        self.cascade(
            "handoff",
            &prompt,
            &schema,
            |payload| parse::suggestion(payload).map(Some),
            fallback::handoff(),
        )
        .await
    }

    /// Convert a calendar note into a backlog task
    ///
    /// Total failure still yields a usable task: a truncated copy of the
    /// note assigned to the founder.
    pub async fn generate_task_from_note(
        &self,
        note: &CalendarNote,
        agents: &[Agent],
        memories: &[MemoryEntry],
    ) -> Outcome<Task> {
        let schema = schemas::task_from_note(agents);
        let outcome = match self.prompts.task_from_note(note, agents, memories) {
            Ok(prompt) => {
                self.cascade("task_from_note", &prompt, &schema, parse::task_draft, fallback::task_from_note(note))
                    .await
            }
            Err(err) => {
                error!("generate_task_from_note: prompt render failed: {err}");
                Outcome::fallback(fallback::task_from_note(note))
            }
        };
        Outcome {
            value: Task::new(outcome.value.content, outcome.value.agent_name),
            route: outcome.route,
        }
    }

    /// Suggest new skills for one agent
    pub async fn suggest_skills(&self, agent: &Agent, memories: &[MemoryEntry]) -> Outcome<Vec<String>> {
        let prompt = match self.prompts.skills(agent, memories) {
            Ok(p) => p,
            Err(err) => {
                error!("suggest_skills: prompt render failed: {err}");
                return Outcome::fallback(fallback::skill_suggestions());
            }
        };
        let schema = schemas::skill_suggestions();
        self.cascade("skills", &prompt, &schema, parse::string_array, fallback::skill_suggestions())
            .await
    }

    /// Generate tasks that exercise skills an agent just gained
    ///
    /// Providers return bare descriptions; every resulting task belongs to
    /// the upgraded agent.
    pub async fn suggest_tasks_for_new_skills(
        &self,
        agent: &Agent,
        added_skills: &[String],
        memories: &[MemoryEntry],
    ) -> Outcome<Vec<Task>> {
        let prompt = match self.prompts.skill_tasks(agent, added_skills, memories) {
            Ok(p) => p,
            Err(err) => {
                error!("suggest_tasks_for_new_skills: prompt render failed: {err}");
                return Outcome::fallback(Vec::new());
            }
        };
        let schema = schemas::skill_tasks();
        let outcome = self
            .cascade("skill_tasks", &prompt, &schema, parse::string_array, fallback::skill_tasks())
            .await;
        Outcome {
            value: outcome
                .value
                .into_iter()
                .map(|content| Task::new(content, agent.name.clone()))
                .collect(),
            route: outcome.route,
        }
    }

    /// Interpret a free-text operator command against the full snapshot
    pub async fn orchestrate_command(
        &self,
        command: &str,
        agents: &[Agent],
        tasks: &[Task],
        memories: &[MemoryEntry],
        notes: &NotesByDate,
    ) -> Outcome<OrchestrationResponse> {
        let prompt = match self.prompts.command(command, agents, tasks, memories, notes) {
            Ok(p) => p,
            Err(err) => {
                error!("orchestrate_command: prompt render failed: {err}");
                return Outcome::fallback(fallback::command());
            }
        };
        let schema = schemas::command(agents);
        self.cascade("command", &prompt, &schema, parse::orchestration_response, fallback::command())
            .await
    }

    /// Generate operator command hints from the current state
    pub async fn generate_hints(
        &self,
        agents: &[Agent],
        tasks: &[Task],
        memories: &[MemoryEntry],
        notes: &NotesByDate,
    ) -> Outcome<Vec<String>> {
        let prompt = match self.prompts.hints(agents, tasks, memories, notes) {
            Ok(p) => p,
            Err(err) => {
                error!("generate_hints: prompt render failed: {err}");
                return Outcome::fallback(fallback::hints());
            }
        };
        let schema = schemas::hints();
        self.cascade("hints", &prompt, &schema, parse::string_array, fallback::hints())
            .await
    }

    /// Stream a conversational reply from an agent
    ///
    /// Chat inverts the provider preference: the secondary (chat-oriented)
    /// provider is tried first. There is no fallback value for a stream, so
    /// exhaustion is an error the caller must surface.
    pub async fn start_conversation(
        &self,
        agent: &Agent,
        history: &[ChatTurn],
        message: &str,
        memories: &[MemoryEntry],
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError> {
        let system_prompt = self
            .prompts
            .chat_system(agent, memories)
            .map_err(|e| LlmError::InvalidResponse(format!("chat system prompt failed to render: {e}")))?;
        let provider = self
            .secondary
            .as_ref()
            .or(self.primary.as_ref())
            .ok_or(LlmError::NoProviderConfigured)?;
        debug!(agent = %agent.name, provider = provider.name(), "start_conversation: streaming");
        provider
            .stream_conversation(&system_prompt, history, message, chunk_tx)
            .await
    }
}
