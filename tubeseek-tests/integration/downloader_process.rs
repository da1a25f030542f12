//! Real dispatcher against a stand-in downloader script.

#![cfg(unix)]

use std::fs;

use tempfile::TempDir;
use tokio_test::assert_ok;
use tubeseek_core::{
    Candidate, DownloadDispatcher, DownloadRequest, OutputFormat, YtDlpDispatcher,
    ensure_output_dir,
};

fn fake_downloader(dir: &TempDir) -> (String, std::path::PathBuf) {
    let args_file = dir.path().join("args.txt");
    let script = dir.path().join("fake-yt-dlp.sh");
    fs::write(
        &script,
        format!("printf '%s\\n' \"$@\" > '{}'\n", args_file.display()),
    )
    .unwrap();
    (script.display().to_string(), args_file)
}

#[tokio::test]
async fn test_dispatched_download_receives_arguments() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("_videos");
    assert_ok!(ensure_output_dir(&output_dir));

    let (script, args_file) = fake_downloader(&dir);
    let dispatcher = YtDlpDispatcher::new("sh", vec![script, "--no-warnings".to_string()]);

    let candidate = Candidate {
        id: "dQw4w9WgXcQ".to_string(),
        title: "Never/Gonna".to_string(),
        ..Default::default()
    };
    let request = DownloadRequest::for_candidate(&candidate, OutputFormat::Webm, &output_dir);

    assert_ok!(dispatcher.dispatch(&request));
    assert_eq!(dispatcher.pending(), 1);
    assert_eq!(dispatcher.wait_all().await, 1);
    assert_eq!(dispatcher.pending(), 0);

    let args = fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    let expected_output = output_dir.join("Never-Gonna.webm");
    assert_eq!(
        args,
        [
            "--no-warnings",
            "--format",
            "webm",
            "--output",
            expected_output.to_str().unwrap(),
            "https://youtube.com/watch?v=dQw4w9WgXcQ",
        ]
    );
}

#[tokio::test]
async fn test_failing_downloader_is_not_counted() {
    let dispatcher = YtDlpDispatcher::new("false", Vec::new());
    let request = DownloadRequest::for_candidate(
        &Candidate::default(),
        OutputFormat::Mp3,
        std::path::Path::new("unused"),
    );

    assert_ok!(dispatcher.dispatch(&request));
    assert_eq!(dispatcher.wait_all().await, 0);
}
