//! Interactive session state machine.
//!
//! One session walks a user from a query to a started download:
//!
//! ```text
//! AwaitingQuery -> Searching -> PresentingResults -> AwaitingSelection -> Terminal
//!                                      |
//!                                    (empty)
//!                                      v
//!                            AwaitingRetryDecision -> AwaitingQuery | Terminal
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tubeseek_core::{
    Candidate, ContentCategory, DownloadDispatcher, DownloadError, DownloadRequest, InvalidInput,
    OutputFormat, Query, ResultLimit, SearchResultSet, SelectionOutcome, TubeseekConfig,
    TubeseekError, parse_limit, select, validate_query,
};
use tubeseek_search::{SearchError, SearchService};

use crate::console::{Accent, Console, Notice, PromptError, TextPrompt};
use crate::spinner::Spinner;

const QUERY_PROMPT: TextPrompt<'static> = TextPrompt {
    message: "Type video name or search query:",
    default: None,
    validate: check_query,
};

const LIMIT_PROMPT: TextPrompt<'static> = TextPrompt {
    message: "Video search limits",
    default: Some("10"),
    validate: check_limit,
};

const CATEGORY_PROMPT: &str = "Filter video type";
const TITLE_PROMPT: &str = "Select videos bellow to download!";
const FORMAT_PROMPT: &str = "Select video type bellow:";
const RETRY_PROMPT: &str = "Try again?";
const SEARCHING_MESSAGE: &str = "Searching ...";

fn check_query(raw: &str) -> Result<(), InvalidInput> {
    validate_query(raw).map(drop)
}

fn check_limit(raw: &str) -> Result<(), InvalidInput> {
    parse_limit(raw).map(drop)
}

/// Errors that end a session early.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl SessionError {
    /// Text shown to the user when the session ends on this error.
    pub fn user_message(self) -> String {
        match self {
            SessionError::Search(SearchError::HttpStatus { status, .. }) => {
                format!("YouTube answered the search with HTTP {status}")
            }
            SessionError::Search(SearchError::ParseError { .. }) => {
                "YouTube returned a results page that could not be read".to_string()
            }
            SessionError::Search(e) => format!("Search failed: {e}"),
            SessionError::Prompt(PromptError::NoSuchChoice { message, .. }) => {
                format!("No valid answer was chosen for {message:?}")
            }
            SessionError::Prompt(_) => "The prompt was closed before the session ended".to_string(),
            SessionError::Download(e) => TubeseekError::from(e).user_message(),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A download was handed to the dispatcher.
    Downloading(DownloadRequest),
    /// The user declined to retry after an empty result.
    Declined,
}

/// Where a session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingQuery,
    Searching {
        query: Query,
        category: ContentCategory,
        limit: ResultLimit,
    },
    PresentingResults {
        results: SearchResultSet,
        category: ContentCategory,
        limit: ResultLimit,
    },
    AwaitingRetryDecision,
    AwaitingSelection(Candidate),
    Terminal(SessionOutcome),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminal(_))
    }

    fn name(&self) -> &'static str {
        match self {
            SessionState::AwaitingQuery => "awaiting-query",
            SessionState::Searching { .. } => "searching",
            SessionState::PresentingResults { .. } => "presenting-results",
            SessionState::AwaitingRetryDecision => "awaiting-retry-decision",
            SessionState::AwaitingSelection(_) => "awaiting-selection",
            SessionState::Terminal(_) => "terminal",
        }
    }
}

/// Drives one interactive session over a [`Console`].
///
/// Searches never overlap and downloads are only dispatched, never awaited.
pub struct SessionController<C: Console> {
    console: C,
    search: SearchService,
    dispatcher: Arc<dyn DownloadDispatcher>,
    output_dir: PathBuf,
    spinner_interval: Duration,
}

impl<C: Console> SessionController<C> {
    pub fn new(
        console: C,
        search: SearchService,
        dispatcher: Arc<dyn DownloadDispatcher>,
        config: &TubeseekConfig,
    ) -> Self {
        Self {
            console,
            search,
            dispatcher,
            output_dir: config.download.output_dir.clone(),
            spinner_interval: config.prompt.spinner_interval,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Runs the session from a fresh query prompt until it ends.
    ///
    /// # Errors
    /// - `SessionError::Search` - Search request failed
    /// - `SessionError::Prompt` - Terminal could not be read or written
    /// - `SessionError::Download` - Downloader could not be started
    pub async fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        let mut state = SessionState::AwaitingQuery;
        loop {
            state = match self.step(state).await? {
                SessionState::Terminal(outcome) => return Ok(outcome),
                next => next,
            };
        }
    }

    /// Performs the work of `state` and returns the state that follows it.
    ///
    /// A terminal state maps to itself.
    ///
    /// # Errors
    /// Same as [`SessionController::run`].
    pub async fn step(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        let from = state.name();
        let next = match state {
            SessionState::AwaitingQuery => self.ask_query()?,
            SessionState::Searching {
                query,
                category,
                limit,
            } => {
                let results = self.run_search(&query).await?;
                SessionState::PresentingResults {
                    results,
                    category,
                    limit,
                }
            }
            SessionState::PresentingResults {
                results,
                category,
                limit,
            } => self.present(select(&results, category, limit))?,
            SessionState::AwaitingRetryDecision => self.ask_retry()?,
            SessionState::AwaitingSelection(candidate) => self.start_download(&candidate)?,
            terminal @ SessionState::Terminal(_) => terminal,
        };

        tracing::debug!("Session {from} -> {}", next.name());
        Ok(next)
    }

    fn ask_query(&mut self) -> Result<SessionState, SessionError> {
        self.console.clear();
        self.console.banner(Accent::Primary);

        let query = self.ask(&QUERY_PROMPT, |raw| validate_query(raw))?;
        let limit = self.ask(&LIMIT_PROMPT, parse_limit)?;

        let labels = ContentCategory::ALL.map(ContentCategory::label);
        let category = ContentCategory::ALL[self.choose(CATEGORY_PROMPT, &labels)?];

        Ok(SessionState::Searching {
            query,
            category,
            limit,
        })
    }

    /// Asks for one of `choices`, defaulting to the first, and rejects
    /// indices the console should never have returned.
    fn choose(&mut self, message: &str, choices: &[&str]) -> Result<usize, PromptError> {
        let index = self.console.select(message, choices, 0)?;
        if index < choices.len() {
            Ok(index)
        } else {
            Err(PromptError::NoSuchChoice {
                message: message.to_string(),
                index,
                offered: choices.len(),
            })
        }
    }

    /// Prompts until `parse` accepts the answer.
    fn ask<T>(
        &mut self,
        prompt: &TextPrompt<'_>,
        parse: impl Fn(&str) -> Result<T, InvalidInput>,
    ) -> Result<T, PromptError> {
        loop {
            let answer = self.console.input(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => tracing::debug!("Rejected answer to {:?}: {e}", prompt.message),
            }
        }
    }

    async fn run_search(&mut self, query: &Query) -> Result<SearchResultSet, SearchError> {
        self.console.clear();
        self.console.banner(Accent::Searching);

        let spinner = Spinner::start(SEARCHING_MESSAGE, self.spinner_interval);
        let results = self.search.search(query).await;
        spinner.stop();

        results
    }

    fn present(&mut self, selection: SelectionOutcome<'_>) -> Result<SessionState, SessionError> {
        tracing::debug!("Selected {} candidates", selection.len());

        if selection.is_empty() {
            self.console.notice(Notice::EmptyResults);
            return Ok(SessionState::AwaitingRetryDecision);
        }

        self.console.clear();
        self.console.notice(Notice::Found(selection.len()));

        let titles = selection.titles();
        let title = titles[self.choose(TITLE_PROMPT, &titles)?];

        // Titles come from the selection itself, so the lookup always hits.
        let candidate = selection
            .find_by_title(title)
            .expect("chosen title belongs to the selection");
        Ok(SessionState::AwaitingSelection(candidate.clone()))
    }

    fn ask_retry(&mut self) -> Result<SessionState, SessionError> {
        let retry = self.console.confirm(RETRY_PROMPT)?;
        self.console.clear();

        if retry {
            Ok(SessionState::AwaitingQuery)
        } else {
            self.console.notice(Notice::Farewell);
            Ok(SessionState::Terminal(SessionOutcome::Declined))
        }
    }

    fn start_download(&mut self, candidate: &Candidate) -> Result<SessionState, SessionError> {
        self.console.clear();
        self.console.banner(Accent::Primary);
        self.console.show_candidate(candidate);

        let labels = OutputFormat::ALL.map(OutputFormat::label);
        let format = OutputFormat::ALL[self.choose(FORMAT_PROMPT, &labels)?];

        let request = DownloadRequest::for_candidate(candidate, format, &self.output_dir);
        self.dispatcher.dispatch(&request)?;
        tracing::info!("Download of {} started as {format}", request.url);

        self.console.notice(Notice::Downloading);
        Ok(SessionState::Terminal(SessionOutcome::Downloading(request)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tokio_test::assert_ok;
    use tubeseek_core::testing::RecordingDispatcher;
    use tubeseek_search::MockProvider;

    use super::*;
    use crate::testing::ScriptedConsole;

    fn candidate(id: &str, title: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn results(videos: usize, streams: usize) -> SearchResultSet {
        SearchResultSet {
            videos: (0..videos)
                .map(|i| candidate(&format!("v{i}"), &format!("lofi video {i}")))
                .collect(),
            streams: (0..streams)
                .map(|i| candidate(&format!("s{i}"), &format!("lofi stream {i}")))
                .collect(),
        }
    }

    fn controller(
        console: ScriptedConsole,
        provider: &MockProvider,
        dispatcher: &Arc<RecordingDispatcher>,
    ) -> SessionController<ScriptedConsole> {
        let mut config = TubeseekConfig::default();
        config.download.output_dir = PathBuf::from("_videos");
        config.prompt.spinner_interval = Duration::from_millis(5);

        SessionController::new(
            console,
            SearchService::with_provider(provider.clone()),
            dispatcher.clone(),
            &config,
        )
    }

    #[tokio::test]
    async fn test_first_five_videos_are_offered() {
        let provider = MockProvider::new().with_results(results(8, 2));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("lofi beats")
            .type_text("5")
            .choose(0)
            .choose(3)
            .choose(1);

        let mut session = controller(console, &provider, &dispatcher);
        let outcome = session.run().await.unwrap();

        assert_eq!(provider.queries(), ["lofi beats"]);
        assert_eq!(
            session.console().choices_for(TITLE_PROMPT).unwrap(),
            ["lofi video 0", "lofi video 1", "lofi video 2", "lofi video 3", "lofi video 4"]
        );

        let expected = DownloadRequest {
            url: "https://youtube.com/watch?v=v3".to_string(),
            format: OutputFormat::Mp4,
            output: Path::new("_videos").join("lofi video 3.mp4"),
        };
        assert_eq!(outcome, SessionOutcome::Downloading(expected.clone()));
        assert_eq!(dispatcher.requests(), [expected]);
        assert!(session.console().notices().contains(&Notice::Found(5)));
        assert_eq!(session.console().notices().last(), Some(&Notice::Downloading));
    }

    #[tokio::test]
    async fn test_empty_results_ask_to_retry() {
        let provider = MockProvider::new().with_results(SearchResultSet::default());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("nothing here")
            .type_text("")
            .choose(0)
            .answer(false);

        let mut session = controller(console, &provider, &dispatcher);
        let outcome = session.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::Declined);
        assert_eq!(session.console().confirmations(), [RETRY_PROMPT]);
        assert_eq!(
            session.console().notices(),
            [Notice::EmptyResults, Notice::Farewell]
        );
    }

    #[tokio::test]
    async fn test_declining_retry_stops_searching() {
        let provider = MockProvider::new();
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("first")
            .type_text("3")
            .choose(1)
            .answer(false);

        let mut session = controller(console, &provider, &dispatcher);
        session.run().await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert!(dispatcher.requests().is_empty());

        let state = assert_ok!(session.step(SessionState::Terminal(SessionOutcome::Declined)).await);
        assert!(state.is_terminal());
        assert_eq!(state, SessionState::Terminal(SessionOutcome::Declined));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_starts_over_without_memory() {
        let provider = MockProvider::new()
            .with_results(SearchResultSet::default())
            .with_results(results(0, 2));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("first")
            .type_text("")
            .choose(0)
            .answer(true)
            .type_text("second")
            .type_text("1")
            .choose(1)
            .choose(0)
            .choose(2);

        let mut session = controller(console, &provider, &dispatcher);
        let outcome = session.run().await.unwrap();

        assert_eq!(provider.queries(), ["first", "second"]);
        assert_eq!(session.console().choices_for(TITLE_PROMPT).unwrap(), ["lofi stream 0"]);
        let SessionOutcome::Downloading(request) = outcome else {
            panic!("expected a download, got {outcome:?}");
        };
        assert_eq!(request.format, OutputFormat::Webm);
        assert_eq!(request.url, "https://youtube.com/watch?v=s0");
    }

    #[tokio::test]
    async fn test_duplicate_title_resolves_to_first() {
        let provider = MockProvider::new().with_results(SearchResultSet {
            videos: vec![],
            streams: vec![candidate("A", "Live Set"), candidate("B", "Live Set")],
        });
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("live set")
            .type_text("10")
            .choose(1)
            .choose(1)
            .choose(0);

        let mut session = controller(console, &provider, &dispatcher);
        session.run().await.unwrap();

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://youtube.com/watch?v=A");
    }

    #[tokio::test]
    async fn test_invalid_answers_are_asked_again() {
        let provider = MockProvider::new();
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("")
            .type_text("ok")
            .type_text("0")
            .type_text("abc")
            .type_text("7")
            .choose(0);

        let mut session = controller(console, &provider, &dispatcher);
        let state = session.step(SessionState::AwaitingQuery).await.unwrap();

        assert_eq!(
            state,
            SessionState::Searching {
                query: validate_query("ok").unwrap(),
                category: ContentCategory::Video,
                limit: parse_limit("7").unwrap(),
            }
        );
        assert_eq!(session.console().rejections().len(), 3);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_ends_session() {
        let provider = MockProvider::new().with_error(SearchError::HttpStatus {
            query: "q".to_string(),
            status: 500,
        });
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new().type_text("q").type_text("").choose(0);

        let mut session = controller(console, &provider, &dispatcher);
        let err = session.run().await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::Search(SearchError::HttpStatus { status: 500, .. })
        ));
        assert!(session.console().confirmations().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_console_is_prompt_error() {
        let provider = MockProvider::new();
        let dispatcher = Arc::new(RecordingDispatcher::new());

        let mut session = controller(ScriptedConsole::new(), &provider, &dispatcher);
        let err = session.run().await.unwrap_err();

        assert!(matches!(err, SessionError::Prompt(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_title_is_prompt_error() {
        let provider = MockProvider::new().with_results(results(2, 0));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("lofi")
            .type_text("")
            .choose(0)
            .choose(2)
            .answer(true);

        let mut session = controller(console, &provider, &dispatcher);
        let err = session.run().await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::Prompt(PromptError::NoSuchChoice {
                index: 2,
                offered: 2,
                ..
            })
        ));
        assert_eq!(session.console().notices(), [Notice::Found(2)]);
        assert!(session.console().confirmations().is_empty());
        assert!(dispatcher.requests().is_empty());
        assert_eq!(
            err.user_message(),
            format!("No valid answer was chosen for {TITLE_PROMPT:?}")
        );
    }

    #[tokio::test]
    async fn test_out_of_range_format_dispatches_nothing() {
        let provider = MockProvider::new().with_results(results(1, 0));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let console = ScriptedConsole::new()
            .type_text("lofi")
            .type_text("")
            .choose(0)
            .choose(0)
            .choose(OutputFormat::ALL.len());

        let mut session = controller(console, &provider, &dispatcher);
        let err = session.run().await.unwrap_err();

        assert!(matches!(err, SessionError::Prompt(PromptError::NoSuchChoice { .. })));
        assert!(dispatcher.requests().is_empty());
    }

    #[test]
    fn test_user_messages() {
        let status = SessionError::from(SearchError::HttpStatus {
            query: "q".to_string(),
            status: 429,
        });
        assert_eq!(status.user_message(), "YouTube answered the search with HTTP 429");

        let network = SessionError::from(SearchError::NetworkError {
            reason: "dns".to_string(),
        });
        assert_eq!(network.user_message(), "Search failed: Network error: dns");

        let closed = SessionError::from(PromptError::Io(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        )));
        assert_eq!(
            closed.user_message(),
            "The prompt was closed before the session ended"
        );

        let spawn = SessionError::from(DownloadError::SpawnFailed {
            executable: "youtube-dl".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(
            spawn.user_message(),
            "Could not start downloader 'youtube-dl', is it installed?"
        );
    }
}
