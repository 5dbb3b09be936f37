//! Tests for request resolution.

use std::time::Duration;

use ictfd::request::{resolve, DEFAULT_CHUNK_SIZE, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use ictfd::{DownloadRequest, Error, ExistingFilePolicy};

mod common;
use common::helpers::*;

#[test]
fn test_resolve_applies_defaults() {
    let temp_dir = create_temp_dir();
    let request = resolve(
        "https://example.com/pub/archive.tar.gz",
        temp_dir.path(),
        None,
        None,
        None,
    )
    .unwrap();

    assert_eq!(request.filename(), "archive.tar.gz");
    assert_eq!(request.chunk_size(), DEFAULT_CHUNK_SIZE);
    assert_eq!(request.timeout(), DEFAULT_TIMEOUT);
    assert_eq!(request.retries(), DEFAULT_RETRIES);
    assert_eq!(request.policy(), ExistingFilePolicy::Ask);
    assert_eq!(request.final_path(), temp_dir.path().join("archive.tar.gz"));
}

#[test]
fn test_resolve_creates_nested_directory() {
    let temp_dir = create_temp_dir();
    let nested = temp_dir.path().join("a").join("b").join("c");

    resolve("http://example.com/f.txt", &nested, None, None, None).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn test_resolve_rejects_zero_values() {
    let temp_dir = create_temp_dir();
    let url = "http://example.com/f.txt";

    for result in [
        resolve(url, temp_dir.path(), Some(0), None, None),
        resolve(url, temp_dir.path(), None, Some(Duration::ZERO), None),
        resolve(url, temp_dir.path(), None, None, Some(0)),
    ] {
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}

#[test]
fn test_resolve_rejects_bad_urls_without_creating_directory() {
    let temp_dir = create_temp_dir();
    let target = temp_dir.path().join("never");

    assert!(matches!(
        resolve("ftp://example.com/f.txt", &target, None, None, None),
        Err(Error::InvalidScheme(scheme)) if scheme == "ftp"
    ));
    assert!(matches!(
        resolve("https://example.com/", &target, None, None, None),
        Err(Error::InvalidUrl(_))
    ));
    assert!(matches!(
        resolve("not a url", &target, None, None, None),
        Err(Error::InvalidUrl(_))
    ));
    assert!(!target.exists());
}

#[test]
fn test_with_filename() {
    let temp_dir = create_temp_dir();
    let request = resolve("http://example.com/f.txt", temp_dir.path(), None, None, None).unwrap();

    let renamed = request.clone().with_filename("report.pdf").unwrap();
    assert_eq!(renamed.final_path(), temp_dir.path().join("report.pdf"));
    assert_eq!(renamed.url(), request.url());

    assert!(request.clone().with_filename("").is_err());
    assert!(request.clone().with_filename("../escape").is_err());
    assert!(request.with_filename("..").is_err());
}

#[test]
fn test_resolve_keeps_reserved_path_characters() {
    let temp_dir = create_temp_dir();
    let request = resolve(
        "https://mirror.example.com/gnu/gcc-c++-13.2.tar.gz",
        temp_dir.path(),
        None,
        None,
        None,
    )
    .unwrap();

    assert_eq!(request.filename(), "gcc-c++-13.2.tar.gz");
    assert_eq!(request.final_path(), temp_dir.path().join("gcc-c++-13.2.tar.gz"));
}

#[test]
fn test_try_from_str() {
    let request = DownloadRequest::try_from("https://example.com/some%20file.zip").unwrap();
    assert_eq!(request.filename(), "some file.zip");
}
