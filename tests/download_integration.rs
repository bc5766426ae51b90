//! Integration tests for the HTTP fetcher.
//!
//! These tests verify the full single-item download flow with mock HTTP servers.

use std::path::Path;

use painting_core::download::{DownloadError, Fetcher, HttpClient};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a mock server with a file endpoint.
async fn setup_mock_file(path_str: &str, content: &[u8]) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&mock_server)
        .await;

    mock_server
}

fn partial_of(destination: &Path) -> std::path::PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(".part");
    name.into()
}

#[tokio::test]
async fn test_download_full_flow_preserves_content() {
    let content = b"\xFF\xD8\xFF\xE0 pretend jpeg bytes \xFF\xD9";
    let mock_server = setup_mock_file("/iiif/abc/full/1600,1600/0/default.jpg", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("42.jpg");

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/iiif/abc/full/1600,1600/0/default.jpg", mock_server.uri());
    let result = client.download_to_file(&url, &destination).await;

    assert!(
        result.is_ok(),
        "Download should succeed: {:?}",
        result.err()
    );
    assert_eq!(result.unwrap(), content.len() as u64);

    let downloaded_content = std::fs::read(&destination).expect("should read file");
    assert_eq!(downloaded_content, content);
    assert!(
        !partial_of(&destination).exists(),
        "partial file should be renamed away"
    );
}

#[tokio::test]
async fn test_download_writes_exact_destination_name() {
    let mock_server = setup_mock_file("/some/remote-name.png", b"bytes").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("7.jpg");

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/some/remote-name.png", mock_server.uri());
    client
        .download_to_file(&url, &destination)
        .await
        .expect("download should succeed");

    let names: Vec<_> = std::fs::read_dir(temp_dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("7.jpg")]);
}

#[tokio::test]
async fn test_download_handles_404_without_leaving_file() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("404.jpg");

    Mock::given(method("GET"))
        .and(path("/not-found"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/not-found", mock_server.uri());
    let result = client.download_to_file(&url, &destination).await;

    match result {
        Err(DownloadError::HttpStatus {
            status,
            url: err_url,
        }) => {
            assert_eq!(status, 404);
            assert!(err_url.contains("/not-found"));
        }
        other => panic!("Expected HttpStatus(404), got: {other:?}"),
    }
    assert!(!destination.exists());
    assert!(!partial_of(&destination).exists());
}

#[tokio::test]
async fn test_download_rejects_non_200_success_codes() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("204.jpg");

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/empty", mock_server.uri());
    let result = client.download_to_file(&url, &destination).await;

    assert!(
        matches!(result, Err(DownloadError::HttpStatus { status: 204, .. })),
        "Expected HttpStatus(204), got: {result:?}"
    );
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_download_handles_500_error() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/server-error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/server-error", mock_server.uri());
    let result = client
        .download_to_file(&url, &temp_dir.path().join("500.jpg"))
        .await;

    match result {
        Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected HttpStatus(500), got: {other:?}"),
    }
}

#[tokio::test]
async fn test_download_connection_refused_is_network_error() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("1.jpg");

    // Bind and immediately release a port so nothing listens on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let uri = format!("http://127.0.0.1:{port}");

    let client = HttpClient::new().expect("client builds");
    let result = client
        .download_to_file(&format!("{uri}/gone.jpg"), &destination)
        .await;

    assert!(
        matches!(
            result,
            Err(DownloadError::Network { .. } | DownloadError::Timeout { .. })
        ),
        "Expected Network, got: {result:?}"
    );
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_download_truncated_body_removes_partial_file() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("9.jpg");

    // Promise 100 000 bytes, send 5 000, then hang up
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = vec![0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: 100000\r\n\r\n")
            .await
            .expect("write head");
        socket.write_all(&[0xAB; 5000]).await.expect("write body");
        socket.flush().await.expect("flush");
    });

    let client = HttpClient::new().expect("client builds");
    let result = client
        .download_to_file(&format!("http://{addr}/9.jpg"), &destination)
        .await;
    server.await.expect("server task");

    assert!(
        matches!(
            result,
            Err(DownloadError::Network { .. } | DownloadError::Timeout { .. })
        ),
        "Expected Network, got: {result:?}"
    );
    assert!(!destination.exists());
    assert!(!partial_of(&destination).exists());
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).expect("read dir").count(),
        0,
        "nothing is left behind after a truncated body"
    );
}

#[tokio::test]
async fn test_download_missing_directory_is_io_error() {
    let mock_server = setup_mock_file("/a.jpg", b"bytes").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("no-such-dir").join("1.jpg");

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/a.jpg", mock_server.uri());
    let result = client.download_to_file(&url, &destination).await;

    assert!(
        matches!(result, Err(DownloadError::Io { .. })),
        "Expected Io, got: {result:?}"
    );
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_download_overwrites_stale_partial_file() {
    let mock_server = setup_mock_file("/a.jpg", b"fresh").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("9.jpg");
    std::fs::write(partial_of(&destination), b"stale partial bytes from a crash")
        .expect("write partial");

    let client = HttpClient::new().expect("client builds");
    let url = format!("{}/a.jpg", mock_server.uri());
    client
        .download_to_file(&url, &destination)
        .await
        .expect("download should succeed");

    assert_eq!(std::fs::read(&destination).expect("read"), b"fresh");
    assert!(!partial_of(&destination).exists());
}

#[tokio::test]
async fn test_fetcher_trait_delegates_to_client() {
    let mock_server = setup_mock_file("/b.jpg", b"via trait").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let destination = temp_dir.path().join("11.jpg");

    let fetcher: &dyn Fetcher = &HttpClient::new().expect("client builds");
    let url = format!("{}/b.jpg", mock_server.uri());
    let bytes = fetcher
        .fetch(&url, &destination)
        .await
        .expect("fetch should succeed");

    assert_eq!(bytes, 9);
    assert_eq!(std::fs::read(&destination).expect("read"), b"via trait");
}
