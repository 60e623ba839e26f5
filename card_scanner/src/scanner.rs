//! Actor that serializes every mutation of a [`ScannerSession`].
//!
//! The session lives on one task and is driven by [`Command`] messages.
//! Remote fetches run on their own tasks and report back through the same
//! channel, so a finished lookup is applied on the owning task like any other
//! event.

use crate::api::CardSource;
use crate::collection::CollectionEntry;
use crate::error::{ScannerError, ScannerResult};
use crate::export;
use crate::session::{Intake, ScanStatus, ScannerSession};
use mtg_common::{CardCondition, CardRecord, LookupResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

const MAILBOX_SIZE: usize = 64;

/// Messages understood by the scanner task
#[derive(Debug)]
pub enum Command {
    RecognizedText {
        text: String,
        reply: oneshot::Sender<bool>,
    },
    LookupFinished {
        name: String,
        result: LookupResult<Option<CardRecord>>,
    },
    UpdateCard {
        id: Uuid,
        condition: CardCondition,
        is_foil: bool,
        quantity: u32,
        reply: oneshot::Sender<bool>,
    },
    DeleteAt {
        indices: Vec<usize>,
        reply: oneshot::Sender<usize>,
    },
    ClearAll {
        reply: oneshot::Sender<()>,
    },
    DismissMessage,
    Snapshot {
        reply: oneshot::Sender<ScannerSnapshot>,
    },
    /// Reply once no lookup is running
    WhenIdle {
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Point-in-time copy of the session state
#[derive(Debug, Clone)]
pub struct ScannerSnapshot {
    pub entries: Vec<CollectionEntry>,
    pub status: ScanStatus,
    pub cached_cards: usize,
}

impl ScannerSnapshot {
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

/// The task owning the session
pub struct Scanner {
    session: ScannerSession,
    source: Arc<dyn CardSource>,
    rx: mpsc::Receiver<Command>,
    /// Weak so that dropping every handle ends the task
    tx: mpsc::WeakSender<Command>,
    idle_waiters: Vec<oneshot::Sender<()>>,
}

impl Scanner {
    /// Spawn the scanner task on the current tokio runtime
    pub fn spawn(
        session: ScannerSession,
        source: Arc<dyn CardSource>,
    ) -> (ScannerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(MAILBOX_SIZE);
        let scanner = Scanner {
            session,
            source,
            rx,
            tx: tx.downgrade(),
            idle_waiters: Vec::new(),
        };
        let task = tokio::spawn(scanner.run());
        (ScannerHandle { tx }, task)
    }

    async fn run(mut self) {
        log::info!("Scanner started");

        while let Some(command) = self.rx.recv().await {
            match command {
                Command::RecognizedText { text, reply } => {
                    let admitted = self.on_recognized_text(&text);
                    let _ = reply.send(admitted);
                }
                Command::LookupFinished { name, result } => {
                    let outcome = self.session.complete_lookup(&name, result);
                    log::debug!("Lookup for '{}' finished: {:?}", name, outcome);
                }
                Command::UpdateCard {
                    id,
                    condition,
                    is_foil,
                    quantity,
                    reply,
                } => {
                    let _ = reply.send(self.session.update_card(id, condition, is_foil, quantity));
                }
                Command::DeleteAt { indices, reply } => {
                    let _ = reply.send(self.session.delete_at(&indices));
                }
                Command::ClearAll { reply } => {
                    self.session.clear_all();
                    let _ = reply.send(());
                }
                Command::DismissMessage => self.session.dismiss_message(),
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                Command::WhenIdle { reply } => self.idle_waiters.push(reply),
                Command::Shutdown => break,
            }

            if !self.session.is_loading() {
                for waiter in self.idle_waiters.drain(..) {
                    let _ = waiter.send(());
                }
            }
        }

        log::info!("Scanner stopped");
    }

    fn on_recognized_text(&mut self, text: &str) -> bool {
        match self.session.handle_recognized_text(text, Instant::now()) {
            Intake::Rejected => false,
            Intake::Resolved(_) | Intake::Joined => true,
            Intake::Fetch { name } => {
                self.start_fetch(name);
                true
            }
        }
    }

    fn start_fetch(&mut self, name: String) {
        let Some(tx) = self.tx.upgrade() else {
            log::debug!("No handle left to receive lookup for '{}'", name);
            self.session.abandon_lookup(&name);
            return;
        };
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            let result = source.fetch_card_by_name(&name).await;
            if tx
                .send(Command::LookupFinished { name, result })
                .await
                .is_err()
            {
                log::debug!("Scanner stopped before lookup finished");
            }
        });
    }

    fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            entries: self.session.entries().to_vec(),
            status: self.session.status(),
            cached_cards: self.session.cache().len(),
        }
    }
}

/// Cloneable front of the scanner task
#[derive(Debug, Clone)]
pub struct ScannerHandle {
    tx: mpsc::Sender<Command>,
}

impl ScannerHandle {
    async fn send(&self, command: Command) -> ScannerResult<()> {
        self.tx.send(command).await.map_err(|_| ScannerError::Closed)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> ScannerResult<T> {
        let (reply, response) = oneshot::channel();
        self.send(make(reply)).await?;
        response.await.map_err(|_| ScannerError::Closed)
    }

    /// Deliver recognized text. Returns whether the intake gate admitted it;
    /// the lookup itself continues in the background.
    pub async fn recognized_text(&self, text: impl Into<String>) -> ScannerResult<bool> {
        let text = text.into();
        self.request(|reply| Command::RecognizedText { text, reply }).await
    }

    pub async fn update_card(
        &self,
        id: Uuid,
        condition: CardCondition,
        is_foil: bool,
        quantity: u32,
    ) -> ScannerResult<bool> {
        self.request(|reply| Command::UpdateCard {
            id,
            condition,
            is_foil,
            quantity,
            reply,
        })
        .await
    }

    pub async fn delete_at(&self, indices: Vec<usize>) -> ScannerResult<usize> {
        self.request(|reply| Command::DeleteAt { indices, reply }).await
    }

    pub async fn clear_all(&self) -> ScannerResult<()> {
        self.request(|reply| Command::ClearAll { reply }).await
    }

    pub async fn dismiss_message(&self) -> ScannerResult<()> {
        self.send(Command::DismissMessage).await
    }

    pub async fn snapshot(&self) -> ScannerResult<ScannerSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Wait until no lookup is running
    pub async fn when_idle(&self) -> ScannerResult<()> {
        self.request(|reply| Command::WhenIdle { reply }).await
    }

    pub async fn to_csv(&self) -> ScannerResult<String> {
        let snapshot = self.snapshot().await?;
        export::to_csv(&snapshot.entries)
    }

    pub async fn export_to_file(&self, dir: &Path) -> ScannerResult<PathBuf> {
        let snapshot = self.snapshot().await?;
        export::export_to_file(&snapshot.entries, dir)
    }

    pub async fn shutdown(&self) -> ScannerResult<()> {
        self.send(Command::Shutdown).await
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
