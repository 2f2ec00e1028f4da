//! Integration tests for the HTTP todo source against a local one-shot server.

mod common;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use common::open_store;
use tasknest_lib::remote::TodoSource;
use tasknest_lib::{HttpTodoSource, NetworkError, Seeder};

const TODOS_BODY: &str = r#"{"todos":[{"id":1,"todo":"Do something nice for someone you care about","completed":false,"userId":152},{"id":2,"todo":"Memorize a poem","completed":true,"userId":13}],"total":254,"skip":0,"limit":2}"#;

/// Serve exactly one HTTP response and return the URL to request.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{}/todos", addr)
}

#[tokio::test]
async fn test_fetch_decodes_payload() {
    let url = serve_once("200 OK", TODOS_BODY);
    let source = HttpTodoSource::new(&url).unwrap();

    let payload = source.fetch_todos().await.unwrap();

    assert_eq!(payload.total, 254);
    assert_eq!(payload.todos.len(), 2);
    assert_eq!(payload.todos[1].todo.as_deref(), Some("Memorize a poem"));
    assert_eq!(payload.todos[1].completed, Some(true));
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let url = serve_once("404 Not Found", "{}");
    let source = HttpTodoSource::new(&url).unwrap();

    let result = source.fetch_todos().await;
    assert!(matches!(result, Err(NetworkError::HttpError(404))));
}

#[tokio::test]
async fn test_fetch_empty_body_is_no_data() {
    let url = serve_once("200 OK", "");
    let source = HttpTodoSource::new(&url).unwrap();

    let result = source.fetch_todos().await;
    assert!(matches!(result, Err(NetworkError::NoData)));
}

#[tokio::test]
async fn test_fetch_malformed_body_is_decoding_error() {
    let url = serve_once("200 OK", r#"{"todos": "nope"}"#);
    let source = HttpTodoSource::new(&url).unwrap();

    let result = source.fetch_todos().await;
    assert!(matches!(result, Err(NetworkError::DecodingError(_))));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_invalid_response() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let source = HttpTodoSource::new(&format!("http://{}/todos", addr)).unwrap();

    let result = source.fetch_todos().await;
    assert!(matches!(result, Err(NetworkError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_seed_over_http() {
    let url = serve_once("200 OK", TODOS_BODY);
    let (_dir, store) = open_store();

    let seeder = Seeder::new(store.clone(), HttpTodoSource::new(&url).unwrap());
    let seeded = seeder.seed().await.unwrap();

    assert_eq!(seeded.len(), 2);
    let ids: Vec<i64> = store.fetch_all().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
}
