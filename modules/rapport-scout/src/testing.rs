// Test mocks for the scrape and compare pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockBackend (RunBackend): scripted run outcome per provider identity
// - MockLanguageModel (LanguageModel): canned reply or error
//
// Plus record builders for the provider output shapes seen in the wild.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use rapport_common::{RawRecord, RunHandle, RunState, RunStatus};

use crate::traits::{LanguageModel, RunBackend};

// ---------------------------------------------------------------------------
// MockBackend
// ---------------------------------------------------------------------------

/// How a scripted provider run behaves.
#[derive(Debug, Clone)]
pub enum ScriptedRun {
    /// Succeeds on the first poll with these records.
    Records(Vec<RawRecord>),
    /// Pending for N polls, then succeeds with these records.
    PendingThen(u32, Vec<RawRecord>),
    /// Ends FAILED with this status message.
    Fails(String),
    /// Ends ABORTED with no status message.
    Aborts,
    /// Reports the provider's own TIMED-OUT status.
    TimesOutRemotely,
    /// Never leaves pending.
    Hangs,
    /// Submission itself errors.
    SubmitError(String),
}

/// Provider-keyed run backend. Submitting to an unscripted provider errors.
/// Builder pattern: `.on_run(identity, script)`.
pub struct MockBackend {
    scripts: HashMap<String, ScriptedRun>,
    submissions: Mutex<Vec<(String, Value)>>,
    polls: Mutex<HashMap<String, u32>>,
    dataset_fetches: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            submissions: Mutex::new(Vec::new()),
            polls: Mutex::new(HashMap::new()),
            dataset_fetches: AtomicUsize::new(0),
        }
    }

    pub fn on_run(mut self, identity: &str, run: ScriptedRun) -> Self {
        self.scripts.insert(identity.to_string(), run);
        self
    }

    /// Provider identities in submission order.
    pub fn submitted(&self) -> Vec<String> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .map(|(identity, _)| identity.clone())
            .collect()
    }

    /// Inputs sent to one provider, in submission order.
    pub fn inputs_for(&self, identity: &str) -> Vec<Value> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == identity)
            .map(|(_, input)| input.clone())
            .collect()
    }

    pub fn polls_for(&self, identity: &str) -> u32 {
        self.polls
            .lock()
            .unwrap()
            .get(identity)
            .copied()
            .unwrap_or(0)
    }

    pub fn dataset_fetches(&self) -> usize {
        self.dataset_fetches.load(Ordering::SeqCst)
    }

    /// True when nothing at all reached the backend.
    pub fn untouched(&self) -> bool {
        self.submissions.lock().unwrap().is_empty()
            && self.polls.lock().unwrap().is_empty()
            && self.dataset_fetches() == 0
    }

    fn script(&self, identity: &str) -> Result<&ScriptedRun> {
        self.scripts
            .get(identity)
            .ok_or_else(|| anyhow!("MockBackend: no run scripted for {identity}"))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunBackend for MockBackend {
    async fn submit_run(&self, provider: &str, input: &Value) -> Result<RunHandle> {
        self.submissions
            .lock()
            .unwrap()
            .push((provider.to_string(), input.clone()));

        if let ScriptedRun::SubmitError(message) = self.script(provider)? {
            return Err(anyhow!("{message}"));
        }

        Ok(RunHandle {
            run_id: format!("run-{provider}"),
            dataset_id: format!("ds-{provider}"),
        })
    }

    async fn run_status(&self, run_id: &str) -> Result<RunState> {
        let identity = run_id
            .strip_prefix("run-")
            .ok_or_else(|| anyhow!("MockBackend: unknown run {run_id}"))?;
        let poll = {
            let mut polls = self.polls.lock().unwrap();
            let count = polls.entry(identity.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let state = match self.script(identity)? {
            ScriptedRun::Records(_) => RunState::new(RunStatus::Succeeded),
            ScriptedRun::PendingThen(pending, _) if poll <= *pending => {
                RunState::new(RunStatus::Pending)
            }
            ScriptedRun::PendingThen(_, _) => RunState::new(RunStatus::Succeeded),
            ScriptedRun::Fails(message) => RunState::new(RunStatus::Failed).with_message(message),
            ScriptedRun::Aborts => RunState::new(RunStatus::Aborted),
            ScriptedRun::TimesOutRemotely => RunState::new(RunStatus::TimedOut),
            ScriptedRun::Hangs => RunState::new(RunStatus::Pending),
            ScriptedRun::SubmitError(_) => {
                return Err(anyhow!("MockBackend: run {run_id} was never submitted"))
            }
        };
        Ok(state)
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<RawRecord>> {
        self.dataset_fetches.fetch_add(1, Ordering::SeqCst);
        let identity = dataset_id
            .strip_prefix("ds-")
            .ok_or_else(|| anyhow!("MockBackend: unknown dataset {dataset_id}"))?;

        match self.script(identity)? {
            ScriptedRun::Records(records) | ScriptedRun::PendingThen(_, records) => {
                Ok(records.clone())
            }
            _ => Err(anyhow!("MockBackend: dataset {dataset_id} has no records")),
        }
    }
}

// ---------------------------------------------------------------------------
// MockLanguageModel
// ---------------------------------------------------------------------------

/// Returns one canned reply (or error) for every prompt and records prompts.
pub struct MockLanguageModel {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
    max_tokens_seen: Mutex<Vec<u32>>,
    calls: AtomicUsize,
}

impl MockLanguageModel {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Err(message.into()))
    }

    fn with_reply(reply: std::result::Result<String, String>) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
            max_tokens_seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn last_max_tokens(&self) -> Option<u32> {
        self.max_tokens_seen.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.max_tokens_seen.lock().unwrap().push(max_tokens);
        self.reply.clone().map_err(|message| anyhow!(message))
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// A LinkedIn profile record in the primary field names.
pub fn linkedin_record(full_name: &str, headline: &str, skills: &[&str]) -> RawRecord {
    json!({
        "fullName": full_name,
        "headline": headline,
        "skills": skills,
    })
}

/// A tweet record with the author nested, as tweet scrapers emit.
pub fn tweet_record(author_name: &str, bio: &str, text: &str) -> RawRecord {
    json!({
        "text": text,
        "author": {
            "name": author_name,
            "description": bio,
            "location": "",
        }
    })
}
