// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared output channel for spawned processes.

use lp_core::{OutputEvent, ProcessId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Events buffered for subscribers that fall behind.
const CHANNEL_CAPACITY: usize = 1024;

/// Most recent events kept per process for replay to late subscribers.
const HISTORY_LIMIT: usize = 512;

struct ChannelState {
    tx: broadcast::Sender<OutputEvent>,
    history: HashMap<ProcessId, VecDeque<OutputEvent>>,
}

/// Fan-out of process output to any number of subscribers.
///
/// Publishing and subscribing happen under one lock, so a subscriber sees
/// every event exactly once: either in its replayed backlog or live.
#[derive(Clone)]
pub struct OutputChannel {
    inner: Arc<Mutex<ChannelState>>,
}

impl Default for OutputChannel {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(ChannelState {
                tx,
                history: HashMap::new(),
            })),
        }
    }
}

impl OutputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to current subscribers and record it for replay.
    pub fn publish(&self, event: OutputEvent) {
        let mut inner = self.inner.lock();
        let history = inner.history.entry(event.source.clone()).or_default();
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(event.clone());
        // No live subscribers is fine; the event stays in history.
        let _ = inner.tx.send(event);
    }

    /// Subscribe to the events of `process`, starting with its backlog.
    pub fn subscribe(&self, process: &ProcessId) -> OutputSubscription {
        let inner = self.inner.lock();
        let backlog = inner.history.get(process).cloned().unwrap_or_default();
        OutputSubscription {
            process: process.clone(),
            backlog,
            rx: Some(inner.tx.subscribe()),
        }
    }

    /// Number of live subscriptions across all processes.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().tx.receiver_count()
    }
}

/// A read-only view of one process's output.
///
/// Dropping the subscription unsubscribes; [`OutputSubscription::unsubscribe`]
/// does the same eagerly and may be called any number of times.
pub struct OutputSubscription {
    process: ProcessId,
    backlog: VecDeque<OutputEvent>,
    rx: Option<broadcast::Receiver<OutputEvent>>,
}

impl OutputSubscription {
    pub fn process(&self) -> &ProcessId {
        &self.process
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Next event from the subscribed process.
    ///
    /// Returns `None` once unsubscribed or when the channel has closed.
    /// Cancel-safe: dropping the future loses no events.
    pub async fn recv(&mut self) -> Option<OutputEvent> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }
        loop {
            let rx = self.rx.as_mut()?;
            match rx.recv().await {
                Ok(event) if event.is_from(&self.process) => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        process = %self.process,
                        skipped,
                        "output subscriber lagged, skipping ahead"
                    );
                }
                Err(RecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Next already-buffered event, without waiting.
    pub fn try_recv(&mut self) -> Option<OutputEvent> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }
        loop {
            let rx = self.rx.as_mut()?;
            match rx.try_recv() {
                Ok(event) if event.is_from(&self.process) => return Some(event),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        process = %self.process,
                        skipped,
                        "output subscriber lagged, skipping ahead"
                    );
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Stop receiving events. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.backlog.clear();
        if self.rx.take().is_some() {
            tracing::trace!(process = %self.process, "unsubscribed from output");
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
