//! Test utilities and fixtures for trackprobe tests.
//!
//! The main helper is [`StubServer`], a scripted loopback HTTP server for
//! exercising the catalog client's status handling without a live service.
//! It binds a `std::net::TcpListener` on 127.0.0.1 and answers each incoming
//! connection with the next canned response, recording request lines so
//! tests can assert how many calls of each kind were made.
//!
//! # Example
//!
//! ```ignore
//! let server = StubServer::serve(vec![
//!     StubResponse::json(200, r#"{"access_token":"t","expires_in":3600}"#),
//!     StubResponse::json(404, r#"{"error":{"status":404,"message":"gone"}}"#),
//! ]);
//! let client = CatalogClient::with_base_urls(creds, server.url("/token"), server.base_url());
//! ```

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

/// One canned HTTP response
pub struct StubResponse {
    status: u16,
    body: String,
}

impl StubResponse {
    /// A JSON response with the given status code
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A loopback HTTP server that answers connections from a script.
///
/// Responses are consumed in order, one per connection; each response closes
/// its connection so the next request arrives on a fresh accept. The server
/// thread exits once the script is exhausted.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start serving the scripted responses on an ephemeral loopback port
    pub fn serve(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        std::thread::spawn(move || {
            for response in responses {
                match listener.accept() {
                    Ok((stream, _)) => answer(stream, &response, &seen),
                    Err(_) => return,
                }
            }
        });

        Self { base_url, requests }
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:49152`
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Base URL with a path appended
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request lines observed so far, e.g. `"POST /token HTTP/1.1"`.
    ///
    /// Each line is recorded before its response is written, so once a
    /// client call has returned, every request it made is visible here.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// Read one request (head plus any declared body), record its request line,
/// and write the canned response with `Connection: close`.
fn answer(stream: TcpStream, response: &StubResponse, seen: &Mutex<Vec<String>>) {
    let mut writer = stream.try_clone().expect("Failed to clone stream");
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }

    // Consume headers, noting the body length
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end().to_ascii_lowercase();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    // Consume the body so the client never sees a reset mid-write
    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        let _ = reader.read_exact(&mut body);
    }

    seen.lock()
        .expect("requests lock")
        .push(request_line.trim_end().to_string());

    let payload = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        response.body.len(),
        response.body
    );
    let _ = writer.write_all(payload.as_bytes());
    let _ = writer.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Token response accepted by the client-credentials flow
pub fn token_body(value: &str) -> String {
    format!(r#"{{"access_token":"{value}","token_type":"Bearer","expires_in":3600}}"#)
}

/// A complete track payload for "Mr. Brightside"
pub fn track_body() -> &'static str {
    r#"{
        "id": "3n3Ppam7vgaVa1iaRUc9Lp",
        "name": "Mr. Brightside",
        "artists": [{"name": "The Killers"}],
        "album": {"name": "Hot Fuss", "release_date": "2004-06-15"},
        "popularity": 88,
        "explicit": false,
        "track_number": 2,
        "disc_number": 1
    }"#
}

/// A complete audio-features payload matching [`track_body`]
pub fn features_body() -> &'static str {
    r#"{
        "danceability": 0.355,
        "energy": 0.918,
        "key": 1,
        "loudness": -4.36,
        "mode": 1,
        "speechiness": 0.0746,
        "acousticness": 0.00121,
        "instrumentalness": 0.0,
        "liveness": 0.0995,
        "valence": 0.24,
        "tempo": 148.033,
        "time_signature": 4,
        "duration_ms": 222973
    }"#
}

/// The API's not-found error envelope
pub fn not_found_body() -> &'static str {
    r#"{"error": {"status": 404, "message": "Non existing id"}}"#
}
