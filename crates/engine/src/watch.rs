// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch session: race URL detection in a process's output against a
//! deadline, cancellation and the process closing.

use lp_adapters::{OutputSubscription, ProcessAdapter, ProcessError};
use lp_core::{extract_url, ExtractionResult, ProcessId};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Default time to wait for a server URL.
pub const DEFAULT_URL_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that prevent a watch session from starting
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("url timeout must be greater than zero")]
    ZeroTimeout,
    #[error("process {0} was never spawned")]
    UnknownProcess(ProcessId),
    #[error(transparent)]
    Process(ProcessError),
}

impl From<ProcessError> for WatchError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::NotFound(id) => WatchError::UnknownProcess(id),
            other => WatchError::Process(other),
        }
    }
}

/// One attempt at extracting a URL from one process.
///
/// Owns the output subscription; [`WatchSession::resolve`] consumes the
/// session, so the subscription is released and a result produced exactly
/// once.
pub struct WatchSession {
    subscription: OutputSubscription,
    started: tokio::time::Instant,
}

impl WatchSession {
    /// Watch `process` until it prints a URL, `timeout` elapses, `cancel`
    /// fires, or the process closes.
    ///
    /// A process that already closed is still watched: whatever it printed
    /// is scanned before reporting [`ExtractionResult::Exited`].
    pub async fn start<P: ProcessAdapter>(
        processes: &P,
        process: &ProcessId,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<ExtractionResult, WatchError> {
        if timeout.is_zero() {
            return Err(WatchError::ZeroTimeout);
        }
        processes.is_alive(process).await?;

        let mut session = WatchSession {
            subscription: processes.subscribe(process),
            started: tokio::time::Instant::now(),
        };
        tracing::debug!(process = %process, timeout_ms = timeout.as_millis() as u64, "watching output");

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);
        let closed = processes.wait_closed(process);
        tokio::pin!(closed);

        let result = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break ExtractionResult::Cancelled,
                event = session.subscription.recv() => match event {
                    Some(event) => {
                        if let Some(url) = extract_url(&event.text) {
                            break ExtractionResult::found(url);
                        }
                    }
                    None => break ExtractionResult::Exited { exit_code: None },
                },
                exit = &mut closed => {
                    let exit_code = exit.unwrap_or_else(|e| {
                        tracing::warn!(process = %process, error = %e, "lost track of process");
                        None
                    });
                    break match session.drain() {
                        Some(url) => ExtractionResult::found(url),
                        None => ExtractionResult::Exited { exit_code },
                    };
                }
                _ = &mut deadline => break ExtractionResult::TimedOut,
            }
        };

        Ok(session.resolve(result))
    }

    /// Scan output that is already buffered.
    fn drain(&mut self) -> Option<String> {
        while let Some(event) = self.subscription.try_recv() {
            if let Some(url) = extract_url(&event.text) {
                return Some(url);
            }
        }
        None
    }

    fn resolve(mut self, result: ExtractionResult) -> ExtractionResult {
        self.subscription.unsubscribe();
        tracing::info!(
            process = %self.subscription.process(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            %result,
            "watch resolved"
        );
        result
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
