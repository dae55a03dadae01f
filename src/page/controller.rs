//! Book page state machine
//!
//! One controller owns everything shown for the current subject: the
//! similar-books pager, the author biography and the book description. It
//! never performs I/O itself. Selecting a subject returns the fetches that
//! still need to happen, and their results are fed back through
//! [`PageController::complete`]. Every request carries a [`Ticket`]; results
//! for a subject the user has already left are dropped.

use crate::book::{AuthorDetails, Book, SubjectKey};
use crate::catalog::CatalogError;
use crate::session::SessionCacheStore;

use super::error::PageError;
use super::paged_cache::{PAGE_SIZE, PagedCache};
use super::text_window::{PREVIEW_SENTENCES, TextWindow};

/// Default number of similar books requested per subject
pub const SIMILAR_BOOKS_LIMIT: usize = 20;

/// Lifecycle of one data pipeline on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No subject selected yet
    #[default]
    Idle,
    /// Waiting for a fetch
    Loading,
    /// Data available (possibly empty)
    Ready,
    /// Terminal failure until the subject changes
    Failed(PageError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Truncated text fields on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AuthorBio,
    BookDescription,
}

/// Identifies which subject selection a fetch belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    subject: SubjectKey,
}

impl Ticket {
    /// Subject the fetch was issued for
    pub fn subject(&self) -> &SubjectKey {
        &self.subject
    }
}

/// A fetch the controller needs performed
#[derive(Debug, Clone)]
pub enum FetchRequest {
    SimilarBooks { ticket: Ticket, subject: Book, limit: usize },
    AuthorDetails { ticket: Ticket, author: String },
}

impl FetchRequest {
    pub fn ticket(&self) -> &Ticket {
        match self {
            FetchRequest::SimilarBooks { ticket, .. } | FetchRequest::AuthorDetails { ticket, .. } => {
                ticket
            }
        }
    }
}

/// Result of a fetch
#[derive(Debug)]
pub enum FetchOutcome {
    SimilarBooks(Result<Vec<Book>, CatalogError>),
    AuthorDetails { author: String, result: Result<Option<AuthorDetails>, CatalogError> },
}

/// A finished fetch, tagged with the ticket of the request that started it
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: Ticket,
    pub outcome: FetchOutcome,
}

/// User intents emitted by the presentation layer
#[derive(Debug, Clone)]
pub enum Intent {
    SelectSubject(Option<Book>),
    NavigateNext,
    NavigatePrevious,
    Expand(TextField),
    Collapse(TextField),
    Toggle(TextField),
}

/// Tunables for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    /// Similar books per window
    pub page_size: usize,
    /// Sentences shown while a text field is collapsed
    pub preview_sentences: usize,
    /// Similar books requested per subject
    pub similar_books_limit: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            preview_sentences: PREVIEW_SENTENCES,
            similar_books_limit: SIMILAR_BOOKS_LIMIT,
        }
    }
}

/// Orchestrates the pager and text windows against the session cache
#[derive(Debug)]
pub struct PageController {
    settings: PageSettings,
    store: SessionCacheStore,
    generation: u64,
    subject: Option<Book>,
    not_found: bool,

    similar: PagedCache<Book>,
    similar_state: LoadState,

    author_bio: TextWindow,
    author_image: String,
    author_state: LoadState,

    description: TextWindow,
}

impl PageController {
    /// Create a controller with no subject
    pub fn new(store: SessionCacheStore, settings: PageSettings) -> Self {
        Self {
            settings,
            store,
            generation: 0,
            subject: None,
            not_found: false,
            similar: PagedCache::with_page_size(settings.page_size),
            similar_state: LoadState::Idle,
            author_bio: TextWindow::new(settings.preview_sentences),
            author_image: String::new(),
            author_state: LoadState::Idle,
            description: TextWindow::new(settings.preview_sentences),
        }
    }

    /// Apply a user intent, returning any fetches it requires
    pub fn handle(&mut self, intent: Intent) -> Vec<FetchRequest> {
        match intent {
            Intent::SelectSubject(book) => return self.select_subject(book),
            Intent::NavigateNext => {
                self.navigate_next();
            }
            Intent::NavigatePrevious => {
                self.navigate_previous();
            }
            Intent::Expand(field) => self.text_mut(field).expand(),
            Intent::Collapse(field) => self.text_mut(field).collapse(),
            Intent::Toggle(field) => self.text_mut(field).toggle(),
        }
        Vec::new()
    }

    /// Tear down the current subject and start loading `book`
    ///
    /// `None` means the page was opened without a book.
    pub fn select_subject(&mut self, book: Option<Book>) -> Vec<FetchRequest> {
        self.generation += 1;
        self.reset();

        let Some(book) = book else {
            tracing::info!("No book to show");
            self.not_found = true;
            self.similar_state = LoadState::Failed(PageError::not_found("Book"));
            self.author_state = LoadState::Failed(PageError::not_found("Author"));
            return Vec::new();
        };

        let key = book.subject_key();
        tracing::info!("Showing {}", key);
        let ticket = Ticket { generation: self.generation, subject: key.clone() };
        let mut requests = Vec::new();

        self.description.set_full(book.description.as_str());

        match self.store.similar_books(&key) {
            Some(books) => {
                tracing::debug!("Similar books for {} served from session cache", key);
                self.similar.seed(books);
                self.similar_state = LoadState::Ready;
            }
            None => {
                self.similar_state = LoadState::Loading;
                requests.push(FetchRequest::SimilarBooks {
                    ticket: ticket.clone(),
                    subject: book.clone(),
                    limit: self.settings.similar_books_limit,
                });
            }
        }

        match book.primary_author().map(str::to_string) {
            None => {
                self.author_state = LoadState::Failed(PageError::not_found("Author"));
            }
            Some(author) => match self.store.author_details(&author) {
                Some(details) => {
                    tracing::debug!("Details for {} served from session cache", author);
                    self.apply_author(details);
                    self.author_state = LoadState::Ready;
                }
                None => {
                    self.author_state = LoadState::Loading;
                    requests.push(FetchRequest::AuthorDetails { ticket, author });
                }
            },
        }

        self.subject = Some(book);
        requests
    }

    /// Apply a finished fetch; returns false if it was stale and dropped
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { ticket, outcome } = completion;
        if !self.is_current(&ticket) {
            tracing::debug!("Dropping stale result for {}", ticket.subject);
            return false;
        }

        match outcome {
            FetchOutcome::SimilarBooks(result) => {
                if !self.similar_state.is_loading() {
                    return false;
                }
                match result {
                    Ok(books) => {
                        tracing::debug!("Fetched {} similar books for {}", books.len(), ticket.subject);
                        if !books.is_empty() {
                            self.store.put_similar_books(&ticket.subject, &books);
                        }
                        self.similar.seed(books);
                        self.similar_state = LoadState::Ready;
                    }
                    Err(e) => {
                        tracing::warn!("Similar books for {} failed: {}", ticket.subject, e);
                        self.similar.clear();
                        self.similar_state =
                            LoadState::Failed(PageError::fetch_failed("similar books", &e));
                    }
                }
            }
            FetchOutcome::AuthorDetails { author, result } => {
                if !self.author_state.is_loading() {
                    return false;
                }
                match result {
                    Ok(Some(details)) => {
                        self.store.put_author_details(&author, &details);
                        self.apply_author(details);
                        self.author_state = LoadState::Ready;
                    }
                    Ok(None) => {
                        tracing::debug!("No details found for {}", author);
                        self.author_state = LoadState::Ready;
                    }
                    Err(e) if e.is_not_found() => {
                        tracing::debug!("Backend has no page for {}", author);
                        self.author_state = LoadState::Failed(PageError::not_found("Author"));
                    }
                    Err(e) => {
                        tracing::warn!("Details for {} failed: {}", author, e);
                        self.author_state =
                            LoadState::Failed(PageError::fetch_failed("author's description", &e));
                    }
                }
            }
        }
        true
    }

    /// Show the next window of similar books
    pub fn navigate_next(&mut self) -> &[Book] {
        if self.similar_state == LoadState::Ready {
            self.similar.next()
        } else {
            self.similar.current()
        }
    }

    /// Show the previous window of similar books
    pub fn navigate_previous(&mut self) -> &[Book] {
        if self.similar_state == LoadState::Ready {
            self.similar.previous()
        } else {
            self.similar.current()
        }
    }

    pub fn expand(&mut self, field: TextField) {
        self.text_mut(field).expand();
    }

    pub fn collapse(&mut self, field: TextField) {
        self.text_mut(field).collapse();
    }

    /// Snapshot for rendering
    pub fn view(&self) -> PageView<'_> {
        PageView {
            subject: self.subject.as_ref(),
            not_found: self.not_found,
            similar_state: &self.similar_state,
            author_state: &self.author_state,
            window: self.similar.current(),
            can_go_previous: self.similar.can_go_previous(),
            can_go_next: self.similar.can_go_next(),
            page_number: self.similar.page_number(),
            page_count: self.similar.page_count(),
            all_similar: self.similar.superset(),
            description: &self.description,
            author_bio: &self.author_bio,
            author_image: Some(self.author_image.as_str()).filter(|url| !url.is_empty()),
        }
    }

    /// Current subject, if any
    pub fn subject(&self) -> Option<&Book> {
        self.subject.as_ref()
    }

    /// Truncation state for a field
    pub fn text(&self, field: TextField) -> &TextWindow {
        match field {
            TextField::AuthorBio => &self.author_bio,
            TextField::BookDescription => &self.description,
        }
    }

    /// Whether any fetch is outstanding for the current subject
    pub fn is_loading(&self) -> bool {
        self.similar_state.is_loading() || self.author_state.is_loading()
    }

    /// Whether `ticket` was issued for the current subject selection
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
            && self.subject.as_ref().is_some_and(|book| book.subject_key() == ticket.subject)
    }

    fn text_mut(&mut self, field: TextField) -> &mut TextWindow {
        match field {
            TextField::AuthorBio => &mut self.author_bio,
            TextField::BookDescription => &mut self.description,
        }
    }

    fn apply_author(&mut self, details: AuthorDetails) {
        self.author_bio.set_full(details.description);
        self.author_image = details.image_url;
    }

    fn reset(&mut self) {
        self.subject = None;
        self.not_found = false;
        self.similar.clear();
        self.similar_state = LoadState::Idle;
        self.author_bio.clear();
        self.author_image.clear();
        self.author_state = LoadState::Idle;
        self.description.clear();
    }
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub subject: Option<&'a Book>,
    pub not_found: bool,
    pub similar_state: &'a LoadState,
    pub author_state: &'a LoadState,
    /// Window of similar books on screen
    pub window: &'a [Book],
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub page_number: usize,
    pub page_count: usize,
    /// Full superset, for the "all similar books" view
    pub all_similar: &'a [Book],
    pub description: &'a TextWindow,
    pub author_bio: &'a TextWindow,
    pub author_image: Option<&'a str>,
}

impl PageView<'_> {
    pub fn loading_similar(&self) -> bool {
        self.similar_state.is_loading()
    }

    pub fn loading_author(&self) -> bool {
        self.author_state.is_loading()
    }

    pub fn similar_error(&self) -> Option<&PageError> {
        self.similar_state.error()
    }

    pub fn author_error(&self) -> Option<&PageError> {
        self.author_state.error()
    }

    /// Fetch succeeded but nothing similar was found
    pub fn similar_books_empty(&self) -> bool {
        *self.similar_state == LoadState::Ready && self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("Sentence {i}.")).collect::<Vec<_>>().join(" ")
    }

    fn books(prefix: &str, count: usize) -> Vec<Book> {
        (1..=count).map(|i| Book::new(format!("{prefix}{i}"), format!("{prefix} {i}"))).collect()
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    fn subject(title: &str) -> Book {
        Book::new(format!("id-{title}"), title)
            .with_authors([format!("{title} Author")])
            .with_description(numbered(7))
    }

    fn controller() -> PageController {
        PageController::new(SessionCacheStore::default(), PageSettings::default())
    }

    fn similar_done(request: &FetchRequest, result: Result<Vec<Book>, CatalogError>) -> FetchCompletion {
        FetchCompletion { ticket: request.ticket().clone(), outcome: FetchOutcome::SimilarBooks(result) }
    }

    fn author_done(
        request: &FetchRequest,
        result: Result<Option<AuthorDetails>, CatalogError>,
    ) -> FetchCompletion {
        let FetchRequest::AuthorDetails { author, .. } = request else {
            panic!("expected author request");
        };
        FetchCompletion {
            ticket: request.ticket().clone(),
            outcome: FetchOutcome::AuthorDetails { author: author.clone(), result },
        }
    }

    #[test]
    fn starts_idle() {
        let page = controller();
        let view = page.view();
        assert_eq!(*view.similar_state, LoadState::Idle);
        assert!(view.window.is_empty());
        assert!(!view.can_go_next && !view.can_go_previous);
    }

    #[test]
    fn cache_miss_issues_both_fetches_and_loads() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));

        assert_eq!(requests.len(), 2);
        assert!(matches!(&requests[0], FetchRequest::SimilarBooks { limit: 20, .. }));
        assert!(matches!(&requests[1], FetchRequest::AuthorDetails { author, .. } if author == "Dune Author"));

        let view = page.view();
        assert!(view.loading_similar());
        assert!(view.loading_author());
        assert_eq!(view.description.shown(), numbered(5));
    }

    #[test]
    fn similar_books_walkthrough() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        assert!(page.complete(similar_done(&requests[0], Ok(books("b", 12)))));

        let view = page.view();
        assert_eq!(*view.similar_state, LoadState::Ready);
        assert_eq!(ids(view.window), vec!["b1", "b2", "b3", "b4", "b5"]);
        assert!(view.can_go_next);
        assert!(!view.can_go_previous);
        assert_eq!(view.all_similar.len(), 12);

        assert_eq!(ids(page.navigate_next()), vec!["b6", "b7", "b8", "b9", "b10"]);
        assert_eq!(ids(page.navigate_next()), vec!["b11", "b12"]);
        assert!(!page.view().can_go_next);
        assert_eq!(ids(page.navigate_next()), vec!["b11", "b12"]);
        assert_eq!(ids(page.navigate_previous()), vec!["b6", "b7", "b8", "b9", "b10"]);
        assert!(page.view().can_go_next);
    }

    #[test]
    fn empty_result_is_ready_not_error() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Obscure")));
        page.complete(similar_done(&requests[0], Ok(Vec::new())));

        let view = page.view();
        assert!(view.similar_books_empty());
        assert!(view.similar_error().is_none());
        assert!(!view.can_go_next && !view.can_go_previous);
    }

    #[test]
    fn empty_result_is_not_cached() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Obscure")));
        page.complete(similar_done(&requests[0], Ok(Vec::new())));

        let again = page.select_subject(Some(subject("Obscure")));
        assert!(again.iter().any(|r| matches!(r, FetchRequest::SimilarBooks { .. })));
    }

    #[test]
    fn revisiting_a_subject_hits_the_cache() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        page.complete(similar_done(&requests[0], Ok(books("b", 7))));
        page.complete(author_done(
            &requests[1],
            Ok(Some(AuthorDetails { description: numbered(8), image_url: "http://img".into() })),
        ));

        page.select_subject(Some(subject("Emma")));
        let requests = page.select_subject(Some(subject("Dune")));

        assert!(requests.is_empty());
        let view = page.view();
        assert_eq!(*view.similar_state, LoadState::Ready);
        assert_eq!(*view.author_state, LoadState::Ready);
        assert_eq!(ids(view.window), vec!["b1", "b2", "b3", "b4", "b5"]);
        assert_eq!(view.author_bio.shown(), numbered(5));
        assert_eq!(view.author_image, Some("http://img"));
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut page = controller();
        let for_a = page.select_subject(Some(subject("A")));
        let for_b = page.select_subject(Some(subject("B")));
        page.complete(similar_done(&for_b[0], Ok(books("b", 3))));

        assert!(!page.complete(similar_done(&for_a[0], Ok(books("a", 9)))));
        assert!(!page.complete(author_done(
            &for_a[1],
            Ok(Some(AuthorDetails { description: "A bio.".into(), image_url: String::new() })),
        )));

        let view = page.view();
        assert_eq!(ids(view.window), vec!["b1", "b2", "b3"]);
        assert!(view.loading_author());
        assert!(view.author_bio.is_empty());
    }

    #[test]
    fn stale_result_for_reselected_subject_is_dropped() {
        let mut page = controller();
        let first = page.select_subject(Some(subject("A")));
        page.select_subject(Some(subject("B")));
        let second = page.select_subject(Some(subject("A")));

        assert!(!page.complete(similar_done(&first[0], Ok(books("old", 2)))));
        assert!(page.complete(similar_done(&second[0], Ok(books("new", 2)))));
        assert_eq!(ids(page.view().window), vec!["new1", "new2"]);
    }

    #[test]
    fn failures_are_isolated_per_pipeline() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        let err = CatalogError::ApiError { status: 500, message: "boom".into() };
        page.complete(author_done(&requests[1], Err(err)));
        page.complete(similar_done(&requests[0], Ok(books("b", 6))));

        let view = page.view();
        assert!(matches!(view.author_error(), Some(PageError::FetchFailed { .. })));
        assert!(view.similar_error().is_none());
        assert_eq!(view.window.len(), 5);
    }

    #[test]
    fn author_missing_upstream_is_not_found() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        let err = CatalogError::ApiError { status: 404, message: "no page".into() };
        assert!(page.complete(author_done(&requests[1], Err(err))));

        let view = page.view();
        assert_eq!(view.author_error(), Some(&PageError::not_found("Author")));
        assert!(view.author_bio.is_empty());
        assert!(view.loading_similar());
    }

    #[test]
    fn similar_failure_shows_no_partial_data() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        let err = CatalogError::ApiError { status: 404, message: "boom".into() };
        page.complete(similar_done(&requests[0], Err(err)));

        let view = page.view();
        assert!(view.similar_error().is_some());
        assert!(view.window.is_empty());
        assert!(!view.similar_books_empty());
        assert!(!view.can_go_next);
    }

    #[test]
    fn failed_is_terminal_until_subject_changes() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        let err = CatalogError::InvalidQuery("no search".into());
        page.complete(similar_done(&requests[0], Err(err)));
        assert!(!page.complete(similar_done(&requests[0], Ok(books("b", 3)))));
        assert!(page.view().similar_error().is_some());

        let retry = page.select_subject(Some(subject("Dune")));
        assert!(page.view().loading_similar());
        page.complete(similar_done(&retry[0], Ok(books("b", 3))));
        assert_eq!(page.view().window.len(), 3);
    }

    #[test]
    fn missing_book_is_not_found() {
        let mut page = controller();
        assert!(page.select_subject(None).is_empty());
        let view = page.view();
        assert!(view.not_found);
        assert_eq!(view.similar_error(), Some(&PageError::not_found("Book")));
    }

    #[test]
    fn book_without_author_skips_author_fetch() {
        let mut page = controller();
        let book = Book::new("x", "Anonymous").with_description("Short.");
        let requests = page.select_subject(Some(book));
        assert_eq!(requests.len(), 1);
        assert_eq!(page.view().author_error(), Some(&PageError::not_found("Author")));
    }

    #[test]
    fn author_absent_is_ready_and_empty() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        page.complete(author_done(&requests[1], Ok(None)));
        let view = page.view();
        assert_eq!(*view.author_state, LoadState::Ready);
        assert!(view.author_bio.is_empty());
        assert!(view.author_image.is_none());
    }

    #[test]
    fn author_bio_truncation_cycle() {
        let mut page = controller();
        let requests = page.select_subject(Some(subject("Dune")));
        page.complete(author_done(
            &requests[1],
            Ok(Some(AuthorDetails { description: numbered(8), image_url: String::new() })),
        ));

        assert_eq!(page.text(TextField::AuthorBio).shown(), numbered(5));
        page.handle(Intent::Expand(TextField::AuthorBio));
        assert_eq!(page.text(TextField::AuthorBio).shown(), numbered(8));
        page.handle(Intent::Collapse(TextField::AuthorBio));
        assert_eq!(page.text(TextField::AuthorBio).shown(), numbered(5));

        // The description is an independent window
        assert!(!page.text(TextField::BookDescription).is_expanded());
    }

    #[test]
    fn subject_change_resets_text_state() {
        let mut page = controller();
        page.select_subject(Some(subject("Dune")));
        page.expand(TextField::BookDescription);
        page.select_subject(Some(Book::new("e", "Emma").with_description("Short one.")));

        let description = page.text(TextField::BookDescription);
        assert!(!description.is_expanded());
        assert_eq!(description.shown(), "Short one.");
    }

    #[test]
    fn navigation_is_ignored_while_loading() {
        let mut page = controller();
        page.select_subject(Some(subject("Dune")));
        assert!(page.handle(Intent::NavigateNext).is_empty());
        assert!(page.navigate_previous().is_empty());
    }
}
