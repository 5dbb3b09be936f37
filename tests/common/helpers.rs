#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use ictfd::request::resolve;
use ictfd::{
    DownloadRequest, Downloader, DownloaderBuilder, Error, ProgressEvent, Result,
    TransferResponse, Transport,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use tempfile::TempDir;

// Common test constants
pub const TEST_URL: &str = "http://files.example.com/archive.bin";
pub const TEST_BACKOFF: Duration = Duration::from_millis(20);

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at {:?}", path);
    assert!(content == expected, "File content mismatch at {:?}", path);
}

/// Resolves `url` into `dir` with a short timeout.
pub fn create_test_request(url: &str, dir: &Path, chunk_size: usize, retries: u32) -> DownloadRequest {
    resolve(
        url,
        dir,
        Some(chunk_size),
        Some(Duration::from_secs(1)),
        Some(retries),
    )
    .expect("Failed to resolve test request")
}

/// Downloader over `transport` with a short backoff.
pub fn create_test_downloader(transport: impl Transport + 'static) -> Downloader {
    DownloaderBuilder::new()
        .backoff(TEST_BACKOFF)
        .transport(transport)
        .build()
        .expect("Failed to build downloader")
}

/// Collects every event emitted during a download.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl EventLog {
    pub fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress {
                    bytes_downloaded, ..
                } => Some(bytes_downloaded),
                _ => None,
            })
            .collect()
    }

    pub fn attempt_failures(&self) -> Vec<(u32, bool)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::AttemptFailed {
                    attempt, will_retry, ..
                } => Some((attempt, will_retry)),
                _ => None,
            })
            .collect()
    }
}

/// What a scripted attempt does.
#[derive(Clone, Debug)]
pub enum Reply {
    /// The connection is refused.
    Refuse,
    /// The server answers with a non-success status.
    Status(u16),
    /// The server answers 200 and sends these pieces.
    Body {
        declared: Option<u64>,
        pieces: Vec<Piece>,
    },
}

#[derive(Clone, Debug)]
pub enum Piece {
    Data(Vec<u8>),
    /// The connection drops.
    Broken,
    /// The server stops sending without closing.
    Stall,
}

impl Reply {
    /// 200 with `content` split in `piece_size` pieces and a Content-Length.
    pub fn body(content: &[u8], piece_size: usize) -> Self {
        Reply::Body {
            declared: Some(content.len() as u64),
            pieces: content
                .chunks(piece_size)
                .map(|c| Piece::Data(c.to_vec()))
                .collect(),
        }
    }
}

/// A [`Transport`] that plays a script, one reply per attempt.
///
/// Once the script runs out, every further attempt is refused.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the engine opened the URL.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn open(&self, _url: &Url, _timeout: Duration) -> Result<TransferResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Refuse);

        match reply {
            Reply::Refuse => Err(Error::Connection("connection refused".into())),
            Reply::Status(code) => Err(Error::HttpStatus(StatusCode::from_u16(code).unwrap())),
            Reply::Body { declared, pieces } => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/octet-stream"),
                );
                if let Some(len) = declared {
                    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
                }
                let body = stream::iter(pieces)
                    .then(|piece| async move {
                        match piece {
                            Piece::Data(data) => Some(Ok(Bytes::from(data))),
                            Piece::Broken => {
                                Some(Err(Error::Connection("connection reset".into())))
                            }
                            Piece::Stall => futures::future::pending().await,
                        }
                    })
                    .filter_map(|item| async move { item })
                    .boxed();
                Ok(TransferResponse {
                    status: StatusCode::OK,
                    headers,
                    body,
                })
            }
        }
    }
}
