//! Async driver running a page controller's fetches on tokio
//!
//! Each fetch runs in its own task and reports back over a channel, so
//! results are applied in completion order. Selecting a new subject cancels
//! the outstanding tasks; anything that still slips through is rejected by
//! the controller's ticket check.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::controller::{
    FetchCompletion, FetchOutcome, FetchRequest, Intent, PageController, PageView,
};
use crate::book::Book;
use crate::catalog::{AuthorFetcher, RecommendationFetcher};

/// A book page wired to its fetch collaborators
pub struct PageSession {
    controller: PageController,
    recommendations: Arc<dyn RecommendationFetcher>,
    authors: Arc<dyn AuthorFetcher>,
    tx: mpsc::UnboundedSender<FetchCompletion>,
    rx: mpsc::UnboundedReceiver<FetchCompletion>,
    cancel: CancellationToken,
}

impl PageSession {
    /// Create a session; no fetch happens until a subject is selected
    pub fn new(
        controller: PageController,
        recommendations: Arc<dyn RecommendationFetcher>,
        authors: Arc<dyn AuthorFetcher>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { controller, recommendations, authors, tx, rx, cancel: CancellationToken::new() }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PageView<'_> {
        self.controller.view()
    }

    /// Show a new book, cancelling work for the previous one
    pub fn select_subject(&mut self, book: Option<Book>) {
        self.handle(Intent::SelectSubject(book));
    }

    /// Apply a user intent and start any fetches it needs
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle(&mut self, intent: Intent) {
        if matches!(intent, Intent::SelectSubject(_)) {
            self.cancel.cancel();
            self.cancel = CancellationToken::new();
        }
        let requests = self.controller.handle(intent);
        for request in requests {
            self.spawn_fetch(request);
        }
    }

    /// Wait for the next fetch to finish and apply it
    ///
    /// Returns whether the result changed the page (false for stale results).
    pub async fn next_completion(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.controller.complete(completion),
            None => false,
        }
    }

    /// Apply every completion that has already arrived, without waiting
    ///
    /// Returns how many changed the page.
    pub fn apply_ready_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.controller.complete(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Whether any fetch for the current subject is outstanding
    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let token = self.cancel.child_token();
        let tx = self.tx.clone();

        match request {
            FetchRequest::SimilarBooks { ticket, subject, limit } => {
                let fetcher = Arc::clone(&self.recommendations);
                tokio::spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => {
                            tracing::debug!("Cancelled similar books fetch for {}", ticket.subject());
                            return;
                        }
                        result = fetcher.similar_books(&subject, limit) => result,
                    };
                    let _ = tx.send(FetchCompletion { ticket, outcome: FetchOutcome::SimilarBooks(result) });
                });
            }
            FetchRequest::AuthorDetails { ticket, author } => {
                let fetcher = Arc::clone(&self.authors);
                tokio::spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => {
                            tracing::debug!("Cancelled author fetch for {}", author);
                            return;
                        }
                        result = fetcher.author_details(&author) => result,
                    };
                    let _ = tx.send(FetchCompletion {
                        ticket,
                        outcome: FetchOutcome::AuthorDetails { author, result },
                    });
                });
            }
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
