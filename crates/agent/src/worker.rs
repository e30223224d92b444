//! Interview task worker
//!
//! A single consumer task owns the state machine and drains a queue of
//! interview tasks. Producers (recognizer callbacks, UI buttons) enqueue
//! from any task; the worker processes strictly in order, and holds the
//! busy flag through both the LLM turn and speech playback so overlapping
//! answers are impossible.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use interviewer_core::{SpeakPriority, SpeechSynthesizer};

use crate::machine::{InterviewEvent, InterviewStateMachine};
use crate::AgentError;

/// What the worker should do
#[derive(Debug, Clone)]
pub enum TaskAction {
    /// Begin a fresh session
    Start,
    /// Handle a final transcript, with an optional editor snapshot
    Process {
        utterance: String,
        code: Option<String>,
    },
    /// Explicit hint request
    Hint,
    /// End the session
    End,
}

/// One queued unit of work
#[derive(Debug, Clone)]
pub struct Task {
    pub action: TaskAction,
}

impl Task {
    pub fn start() -> Self {
        Self {
            action: TaskAction::Start,
        }
    }

    pub fn process(utterance: impl Into<String>, code: Option<String>) -> Self {
        Self {
            action: TaskAction::Process {
                utterance: utterance.into(),
                code,
            },
        }
    }

    pub fn hint() -> Self {
        Self {
            action: TaskAction::Hint,
        }
    }

    pub fn end() -> Self {
        Self {
            action: TaskAction::End,
        }
    }
}

/// Spawns the worker task
pub struct InterviewWorker;

impl InterviewWorker {
    /// Move the machine into a worker task and return its handle.
    ///
    /// When a synthesizer is attached, every response is spoken to
    /// completion before the next task is dequeued.
    pub fn spawn(
        mut machine: InterviewStateMachine,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> WorkerHandle {
        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let busy = Arc::new(AtomicBool::new(false));
        let events = machine.event_sender();

        let worker_busy = busy.clone();
        let worker_events = events.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    res = shutdown_rx.changed() => {
                        // A dropped sender shuts the worker down too
                        if res.is_err() || *shutdown_rx.borrow() {
                            tracing::debug!("Worker shutting down, dropping queued tasks");
                            break;
                        }
                    }
                    task = rx.recv() => {
                        let Some(task) = task else { break };
                        worker_busy.store(true, Ordering::SeqCst);

                        let response = Self::dispatch(&mut machine, task).await;
                        Self::play(&synthesizer, &worker_events, &response).await;

                        worker_busy.store(false, Ordering::SeqCst);
                    }
                }
            }
        });

        WorkerHandle {
            tx,
            busy,
            shutdown_tx,
            handle,
            events,
        }
    }

    async fn dispatch(machine: &mut InterviewStateMachine, task: Task) -> String {
        match task.action {
            TaskAction::Start => machine.start_interview().await,
            TaskAction::Process { utterance, code } => {
                machine.process_input(&utterance, code.as_deref()).await
            }
            TaskAction::Hint => machine.request_hint().await,
            TaskAction::End => machine.end_interview().await,
        }
    }

    async fn play(
        synthesizer: &Option<Arc<dyn SpeechSynthesizer>>,
        events: &broadcast::Sender<InterviewEvent>,
        text: &str,
    ) {
        let Some(synth) = synthesizer else { return };
        if text.is_empty() {
            return;
        }

        let _ = events.send(InterviewEvent::SpeakingStarted);
        let result = async {
            synth.speak(text, SpeakPriority::Normal).await?;
            synth.wait_until_done().await
        }
        .await;
        if let Err(e) = result {
            tracing::error!(error = %e, "Speech playback failed");
            let _ = events.send(InterviewEvent::Error(e.to_string()));
        }
        let _ = events.send(InterviewEvent::SpeakingFinished);
    }
}

/// Producer-side handle to the worker
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<Task>,
    busy: Arc<AtomicBool>,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
    events: broadcast::Sender<InterviewEvent>,
}

impl WorkerHandle {
    /// Queue a task unconditionally
    pub fn enqueue(&self, task: Task) -> Result<(), AgentError> {
        self.tx
            .send(task)
            .map_err(|_| AgentError::Worker("Worker has shut down".to_string()))
    }

    /// Queue a task only when the worker is idle. Producers use this to
    /// drop inputs that arrive while a previous turn is still playing.
    pub fn enqueue_if_idle(&self, task: Task) -> bool {
        if self.is_busy() {
            return false;
        }
        self.enqueue(task).is_ok()
    }

    /// True from task pickup until playback of its response completes
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InterviewEvent> {
        self.events.subscribe()
    }

    /// Signal shutdown and wait for the worker to stop. Queued tasks are
    /// dropped; the in-flight task gets `timeout` to finish before the
    /// worker is aborted.
    pub async fn shutdown(mut self, timeout: Duration) {
        let _ = self.shutdown_tx.send(true);
        if tokio::time::timeout(timeout, &mut self.handle)
            .await
            .is_err()
        {
            tracing::warn!("Worker did not stop in time, aborting");
            self.handle.abort();
        }
    }
}
