//! Full sessions from query prompt to dispatched download.

use std::path::Path;
use std::sync::Arc;

use tubeseek_cli::testing::ScriptedConsole;
use tubeseek_cli::{Notice, SessionController, SessionOutcome};
use tubeseek_core::testing::RecordingDispatcher;
use tubeseek_core::{Candidate, OutputFormat, SearchResultSet, TubeseekConfig};
use tubeseek_search::{MockProvider, SearchService};

fn candidate(id: &str, title: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        link: format!("https://www.youtube.com/watch?v={id}"),
        ..Default::default()
    }
}

fn session(
    console: ScriptedConsole,
    search: SearchService,
    dispatcher: &Arc<RecordingDispatcher>,
) -> SessionController<ScriptedConsole> {
    SessionController::new(console, search, dispatcher.clone(), &TubeseekConfig::default())
}

#[tokio::test]
async fn test_development_mode_downloads_demo_result() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let search = SearchService::from_config(&TubeseekConfig::for_development()).unwrap();
    let console = ScriptedConsole::new()
        .type_text("AC/DC live")
        .type_text("5")
        .choose(0)
        .choose(0)
        .choose(0);

    let mut session = session(console, search, &dispatcher);
    let outcome = session.run().await.unwrap();

    let SessionOutcome::Downloading(request) = outcome else {
        panic!("expected a download, got {outcome:?}");
    };
    assert_eq!(request.format, OutputFormat::Mp3);
    assert_eq!(request.output, Path::new("_videos").join("AC-DC live (part 1).mp3"));
    assert!(request.url.starts_with("https://youtube.com/watch?v="));
    assert_eq!(dispatcher.requests(), [request]);
    assert_eq!(session.console().notices(), [Notice::Found(5), Notice::Downloading]);
}

#[tokio::test]
async fn test_limit_bounds_live_streams() {
    let provider = MockProvider::new().with_results(SearchResultSet {
        videos: (0..8).map(|i| candidate(&format!("v{i}"), &format!("video {i}"))).collect(),
        streams: vec![candidate("s0", "radio"), candidate("s1", "concert")],
    });
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let console = ScriptedConsole::new()
        .type_text("lofi beats")
        .type_text("5")
        .choose(1)
        .choose(1)
        .choose(1);

    let mut session = session(console, SearchService::with_provider(provider.clone()), &dispatcher);
    session.run().await.unwrap();

    assert_eq!(
        session.console().choices_for("Select videos bellow to download!").unwrap(),
        ["radio", "concert"]
    );
    assert_eq!(session.console().shown_candidates(), ["s1"]);

    let requests = dispatcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://youtube.com/watch?v=s1");
    assert_eq!(requests[0].output, Path::new("_videos").join("concert.mp4"));
}

#[tokio::test]
async fn test_blank_demo_query_leads_to_farewell() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let console = ScriptedConsole::new()
        .type_text("   ")
        .type_text("")
        .choose(0)
        .answer(false);

    let mut session = session(console, SearchService::new_demo(), &dispatcher);
    let outcome = session.run().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Declined);
    assert_eq!(session.console().notices(), [Notice::EmptyResults, Notice::Farewell]);
    assert_eq!(session.console().confirmations(), ["Try again?"]);
    assert!(dispatcher.requests().is_empty());
}
