//! Operation dispatch
//!
//! A plan is a list of [`Operation`]s run against one [`PhraseStore`]. Each
//! operation finishes with a typed [`Completion`] sent over a channel.
//!
//! Two orderings are supported:
//! - [`Ordering::Serialized`]: each operation completes before the next one
//!   is issued, so completions arrive in plan order.
//! - [`Ordering::Detached`]: every operation is issued at once as its own
//!   task and waits a [`Jitter`] delay before reaching the store. The store
//!   mutex keeps them from overlapping but their order is not the plan's, so
//!   a listing can miss pending inserts and an insert can overtake schema
//!   creation.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use crate::phrase::Phrase;
use crate::storage::PhraseStore;
use crate::{Error, Result};

/// A single request against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    EnsureSchema,
    Insert(String),
    List,
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::EnsureSchema => "schema",
            Operation::Insert(_) => "insert",
            Operation::List => "list",
        }
    }

    /// Run against the store, folding any error into the completion
    pub fn apply(self, store: &PhraseStore, binding: Binding) -> Completion {
        match self {
            Operation::EnsureSchema => Completion::Schema(store.ensure_schema()),
            Operation::Insert(text) => {
                let result = match binding {
                    Binding::Bound => store.insert_phrase(&text).map(Some),
                    Binding::Template => store.insert_phrase_templated(&text).map(|_| None),
                };
                Completion::Insert { text, result }
            }
            Operation::List => Completion::List(store.list_phrases()),
        }
    }

    /// Completion reported when the store could not be reached at all
    fn failed(self, error: Error) -> Completion {
        match self {
            Operation::EnsureSchema => Completion::Schema(Err(error)),
            Operation::Insert(text) => Completion::Insert { text, result: Err(error) },
            Operation::List => Completion::List(Err(error)),
        }
    }
}

/// Outcome of one operation
#[derive(Debug)]
pub enum Completion {
    Schema(Result<()>),
    /// `Some(id)` for bound inserts; templated inserts cannot report an id
    Insert {
        text: String,
        result: Result<Option<i64>>,
    },
    List(Result<Vec<Phrase>>),
}

impl Completion {
    pub fn kind(&self) -> &'static str {
        match self {
            Completion::Schema(_) => "schema",
            Completion::Insert { .. } => "insert",
            Completion::List(_) => "list",
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Completion::Schema(r) => r.as_ref().err(),
            Completion::Insert { result, .. } => result.as_ref().err(),
            Completion::List(r) => r.as_ref().err(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }

    /// Rows returned by a successful listing
    pub fn rows(&self) -> Option<&[Phrase]> {
        match self {
            Completion::List(Ok(rows)) => Some(rows),
            _ => None,
        }
    }
}

/// How operations of a plan are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    #[default]
    Serialized,
    Detached,
}

/// How insert commands are built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    #[default]
    Bound,
    Template,
}

/// Upper bound of the random delay a detached operation waits before running
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(5);

/// Delay applied to each detached operation before it takes the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jitter {
    /// Uniform random delay in `0..max`
    Random { max: Duration },
    /// Delay per plan position; positions past the end wait zero
    Fixed(Vec<Duration>),
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::Random { max: DEFAULT_MAX_JITTER }
    }
}

impl Jitter {
    fn delay_for(&self, index: usize, rng: &mut fastrand::Rng) -> Duration {
        match self {
            Jitter::Random { max } => {
                let micros = max.as_micros() as u64;
                if micros == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_micros(rng.u64(..micros))
                }
            }
            Jitter::Fixed(delays) => delays.get(index).copied().unwrap_or(Duration::ZERO),
        }
    }
}

/// Schema, one insert per phrase, then a listing
pub fn demo_plan<S: AsRef<str>>(phrases: &[S]) -> Vec<Operation> {
    let mut plan = Vec::with_capacity(phrases.len() + 2);
    plan.push(Operation::EnsureSchema);
    plan.extend(phrases.iter().map(|p| Operation::Insert(p.as_ref().to_string())));
    plan.push(Operation::List);
    plan
}

/// Runs plans against a shared store
pub struct Dispatcher {
    store: Arc<Mutex<PhraseStore>>,
    ordering: Ordering,
    binding: Binding,
    jitter: Jitter,
}

impl Dispatcher {
    pub fn new(store: PhraseStore, ordering: Ordering, binding: Binding) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            ordering,
            binding,
            jitter: Jitter::default(),
        }
    }

    /// Replace the delays used by [`Ordering::Detached`]
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Issue every operation of `plan`.
    ///
    /// Must be called inside a Tokio runtime. The receiver yields one
    /// completion per operation and closes once all of them have finished.
    pub fn dispatch(&self, plan: Vec<Operation>) -> mpsc::UnboundedReceiver<Completion> {
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::debug!(operations = plan.len(), ordering = ?self.ordering, "Dispatching plan");

        match self.ordering {
            Ordering::Serialized => self.dispatch_serialized(plan, tx),
            Ordering::Detached => self.dispatch_detached(plan, tx),
        }

        rx
    }

    fn dispatch_serialized(&self, plan: Vec<Operation>, tx: mpsc::UnboundedSender<Completion>) {
        let store = Arc::clone(&self.store);
        let binding = self.binding;

        tokio::spawn(async move {
            for op in plan {
                let shared = Arc::clone(&store);
                let fallback = op.clone();
                let completion = match tokio::task::spawn_blocking(move || run_locked(&shared, op, binding)).await {
                    Ok(completion) => completion,
                    Err(e) => {
                        tracing::error!("Operation task failed: {}", e);
                        fallback.failed(Error::Task(e.to_string()))
                    }
                };
                if tx.send(completion).is_err() {
                    tracing::debug!("Completion receiver dropped; stopping plan");
                    break;
                }
            }
            // Dropped before `tx` so a closed receiver means the store is free.
            drop(store);
        });
    }

    fn dispatch_detached(&self, plan: Vec<Operation>, tx: mpsc::UnboundedSender<Completion>) {
        let mut rng = fastrand::Rng::new();

        for (index, op) in plan.into_iter().enumerate() {
            let store = Arc::clone(&self.store);
            let tx = tx.clone();
            let binding = self.binding;
            let delay = self.jitter.delay_for(index, &mut rng);

            tokio::spawn(async move {
                if delay.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(delay).await;
                }

                let shared = Arc::clone(&store);
                let fallback = op.clone();
                let completion = match tokio::task::spawn_blocking(move || run_locked(&shared, op, binding)).await {
                    Ok(completion) => completion,
                    Err(e) => {
                        tracing::error!("Operation task failed: {}", e);
                        fallback.failed(Error::Task(e.to_string()))
                    }
                };
                // Release the store before signalling so the last completion
                // implies no task still holds it.
                drop(store);
                let _ = tx.send(completion);
            });
        }
    }

    /// Take the store back once every dispatched operation has finished
    pub fn into_store(self) -> Result<PhraseStore> {
        let mutex = Arc::try_unwrap(self.store).map_err(|_| Error::StoreBusy)?;
        mutex.into_inner().map_err(|_| Error::LockPoisoned)
    }
}

fn run_locked(store: &Mutex<PhraseStore>, op: Operation, binding: Binding) -> Completion {
    tracing::debug!(kind = op.kind(), "Running operation");
    match store.lock() {
        Ok(guard) => op.apply(&guard, binding),
        Err(_) => op.failed(Error::LockPoisoned),
    }
}

/// Drain a receiver, keeping arrival order
pub async fn collect(mut rx: mpsc::UnboundedReceiver<Completion>) -> Vec<Completion> {
    let mut completions = Vec::new();
    while let Some(completion) = rx.recv().await {
        completions.push(completion);
    }
    completions
}
