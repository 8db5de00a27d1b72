//! Session-wide favorites mirror with optimistic updates.
//!
//! [`FavoritesManager`] answers [`is_favorite`](FavoritesManager::is_favorite)
//! from a local mirror that changes the moment the user toggles. The matching
//! remote write runs on a spawned task; if it fails, a compensating action
//! restores the mirror and the user is told through the [`Notifier`].
//!
//! Remote writes for one event id go through a per-id queue, so they reach
//! the server in toggle order. Every local change bumps a per-id generation
//! and a rollback only applies while its generation is still the latest, so
//! a slow failure never reverts a newer toggle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use gigscout_core::event::EventSummary;
use tokio::sync::{mpsc, oneshot};

use crate::api::ClientError;
use crate::notify::{Notification, Notifier};

/// Remote persistence for favorites.
#[async_trait]
pub trait FavoritesRemote: Send + Sync {
    /// Every stored favorite, newest first.
    async fn list(&self) -> Result<Vec<EventSummary>, ClientError>;

    /// Create or replace the favorite for `event.id`.
    async fn save(&self, event: &EventSummary) -> Result<(), ClientError>;

    /// Remove the favorite; an unknown id is not an error.
    async fn delete(&self, event_id: &str) -> Result<(), ClientError>;
}

/// Optimistic favorites state shared by every view in a session.
///
/// Cheap to clone. Toggling spawns onto the current tokio runtime, so it must
/// be called from within one.
#[derive(Clone)]
pub struct FavoritesManager {
    shared: Arc<Shared>,
}

/// Completion signal for a queued remote write.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct PendingWrite(oneshot::Receiver<()>);

impl PendingWrite {
    /// Wait until the write, and any compensation it triggered, has finished.
    pub async fn finished(self) {
        let _ = self.0.await;
    }
}

/// Undo action attached to a "removed from favorites" notification.
pub struct Undo {
    shared: Arc<Shared>,
    event: EventSummary,
}

impl std::fmt::Debug for Undo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Undo").field("event_id", &self.event.id).finish()
    }
}

impl Undo {
    pub fn event(&self) -> &EventSummary {
        &self.event
    }

    /// Put the event back in the favorites and save it again.
    ///
    /// Returns `None` without doing anything if the event is already a
    /// favorite again.
    pub fn invoke(self) -> Option<PendingWrite> {
        self.shared.readd(self.event)
    }
}

struct Shared {
    remote: Arc<dyn FavoritesRemote>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    mirror: HashMap<String, Entry>,
    next_seq: u64,
    generations: HashMap<String, u64>,
    queues: HashMap<String, mpsc::UnboundedSender<Job>>,
}

struct Entry {
    /// Insertion order; higher is newer.
    seq: u64,
    event: EventSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Write {
    Add,
    Readd,
    Remove,
}

struct Job {
    write: Write,
    event: EventSummary,
    generation: u64,
    done: oneshot::Sender<()>,
}

impl State {
    fn insert(&mut self, event: EventSummary) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.mirror.insert(event.id.clone(), Entry { seq, event });
    }

    fn bump(&mut self, event_id: &str) -> u64 {
        let generation = self.generations.entry(event_id.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    fn is_current(&self, event_id: &str, generation: u64) -> bool {
        self.generations.get(event_id) == Some(&generation)
    }
}

impl FavoritesManager {
    pub fn new(remote: Arc<dyn FavoritesRemote>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            shared: Arc::new(Shared {
                remote,
                notifier,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Rebuild the mirror from the server.
    ///
    /// On failure the mirror is left as it was and the user is notified.
    pub async fn load(&self) {
        match self.shared.remote.list().await {
            Ok(favorites) => {
                let count = favorites.len();
                let mut state = self.shared.state();
                state.mirror.clear();
                // Newest arrives first; insert oldest first so it gets the lowest seq.
                for event in favorites.into_iter().rev() {
                    state.insert(event);
                }
                drop(state);
                tracing::debug!(count, "Favorites loaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load favorites");
                self.shared
                    .notifier
                    .notify(Notification::Error("Could not load favorites.".into()));
            }
        }
    }

    pub fn is_favorite(&self, event_id: &str) -> bool {
        self.shared.state().mirror.contains_key(event_id)
    }

    /// Snapshot of the mirror, most recently added first.
    pub fn favorites(&self) -> Vec<EventSummary> {
        let state = self.shared.state();
        let mut entries: Vec<&Entry> = state.mirror.values().collect();
        entries.sort_by(|a, b| b.seq.cmp(&a.seq));
        entries.into_iter().map(|e| e.event.clone()).collect()
    }

    /// Flip the favorite state of `event`.
    ///
    /// The mirror and the notification change before this returns; the
    /// remote write is queued. The returned handle can be awaited or dropped.
    pub fn toggle_favorite(&self, event: EventSummary) -> PendingWrite {
        let (pending, notification) = {
            let mut state = self.shared.state();
            let generation = state.bump(&event.id);

            match state.mirror.remove(&event.id) {
                Some(entry) => {
                    let removed = entry.event;
                    let notification = Notification::Info {
                        message: format!("{} removed from favorites!", removed.name),
                        undo: Some(Undo {
                            shared: Arc::clone(&self.shared),
                            event: removed.clone(),
                        }),
                    };
                    let pending = self
                        .shared
                        .enqueue(&mut state, Write::Remove, removed, generation);
                    (pending, notification)
                }
                None => {
                    state.insert(event.clone());
                    let notification =
                        Notification::Success(format!("{} added to favorites!", event.name));
                    let pending = self.shared.enqueue(&mut state, Write::Add, event, generation);
                    (pending, notification)
                }
            }
        };

        self.shared.notifier.notify(notification);
        pending
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn readd(self: &Arc<Self>, event: EventSummary) -> Option<PendingWrite> {
        let pending = {
            let mut state = self.state();
            if state.mirror.contains_key(&event.id) {
                return None;
            }
            let generation = state.bump(&event.id);
            state.insert(event.clone());
            self.enqueue(&mut state, Write::Readd, event.clone(), generation)
        };

        self.notifier.notify(Notification::Success(format!(
            "{} re-added to favorites!",
            event.name
        )));
        Some(pending)
    }

    /// Queue a remote write behind any earlier writes for the same id.
    ///
    /// Called with the state lock held so queue order matches toggle order.
    fn enqueue(
        self: &Arc<Self>,
        state: &mut State,
        write: Write,
        event: EventSummary,
        generation: u64,
    ) -> PendingWrite {
        let (done, finished) = oneshot::channel();
        let event_id = event.id.clone();
        let mut job = Job {
            write,
            event,
            generation,
            done,
        };

        if let Some(queue) = state.queues.get(&event_id) {
            match queue.send(job) {
                Ok(()) => return PendingWrite(finished),
                Err(mpsc::error::SendError(returned)) => job = returned,
            }
        }

        let (queue, jobs) = mpsc::unbounded_channel();
        // The receiver is alive until `drain` returns.
        let _ = queue.send(job);
        state.queues.insert(event_id.clone(), queue);
        tokio::spawn(Arc::clone(self).drain(event_id, jobs));

        PendingWrite(finished)
    }

    /// Run the queued writes for one id, then retire the queue.
    async fn drain(self: Arc<Self>, event_id: String, mut jobs: mpsc::UnboundedReceiver<Job>) {
        loop {
            let job = {
                let mut state = self.state();
                match jobs.try_recv() {
                    Ok(job) => job,
                    Err(_) => {
                        state.queues.remove(&event_id);
                        return;
                    }
                }
            };
            self.perform(job).await;
        }
    }

    async fn perform(&self, job: Job) {
        let Job {
            write,
            event,
            generation,
            done,
        } = job;

        match write {
            Write::Add => {
                let message = format!("Could not add {} to favorites.", event.name);
                self.save_or_rollback(&event, generation, message).await;
            }
            Write::Readd => {
                let message = format!("Could not re-add {}.", event.name);
                self.save_or_rollback(&event, generation, message).await;
            }
            Write::Remove => self.delete_or_restore(&event, generation).await,
        }

        let _ = done.send(());
    }

    async fn save_or_rollback(&self, event: &EventSummary, generation: u64, message: String) {
        let Err(e) = self.remote.save(event).await else {
            return;
        };
        tracing::warn!(event_id = %event.id, error = %e, "Failed to save favorite");

        {
            let mut state = self.state();
            if state.is_current(&event.id, generation) {
                state.mirror.remove(&event.id);
            }
        }
        self.notifier.notify(Notification::Error(message));
    }

    async fn delete_or_restore(&self, event: &EventSummary, generation: u64) {
        let Err(e) = self.remote.delete(&event.id).await else {
            return;
        };
        tracing::warn!(event_id = %event.id, error = %e, "Failed to remove favorite");

        let restored = {
            let mut state = self.state();
            let current = state.is_current(&event.id, generation);
            if current {
                state.insert(event.clone());
            }
            current
        };
        self.notifier
            .notify(Notification::Error(format!("Could not remove {}.", event.name)));

        if restored {
            if let Err(e) = self.remote.save(event).await {
                tracing::warn!(event_id = %event.id, error = %e, "Failed to re-save favorite");
                self.notifier
                    .notify(Notification::Error(format!("Could not re-add {}.", event.name)));
            }
        }
    }
}
