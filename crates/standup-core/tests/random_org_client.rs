//! Integration tests for the random.org client against a loopback server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use standup_core::{filter, todays_order, PermutationSource, RandomOrgClient};
use standup_models::{Member, RunDirectives};

const KEY: &str = "test-api-key";

/// Serves `count` requests, answering each with `handler(request_json)`.
fn serve<F>(count: usize, handler: F) -> (String, JoinHandle<Vec<Value>>)
where
    F: Fn(&Value) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/json-rpc/4/invoke", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..count {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            let request: Value = serde_json::from_slice(&body).unwrap();

            let (status, reply) = handler(&request);
            let reason = if status == 200 { "OK" } else { "Error" };
            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                reply.len(),
                reply
            )
            .unwrap();
            stream.flush().unwrap();
            seen.push(request);
        }
        seen
    });

    (url, handle)
}

fn reply_with(request: &Value, data: &[i64], advisory_delay: u64) -> String {
    json!({
        "jsonrpc": "2.0",
        "result": {
            "random": { "data": data, "completionTime": "2026-10-18 09:00:00Z" },
            "bitsUsed": 7,
            "bitsLeft": 249993,
            "requestsLeft": 998,
            "advisoryDelay": advisory_delay
        },
        "id": request["id"]
    })
    .to_string()
}

fn client(url: &str, timeout: Duration) -> RandomOrgClient {
    RandomOrgClient::new(url, KEY, timeout).unwrap()
}

#[test]
fn test_permutation_round_trip() {
    let (url, server) = serve(1, |req| (200, reply_with(req, &[3, 1, 0, 2], 0)));

    let permutation = client(&url, Duration::from_secs(5))
        .generate_permutation(4)
        .unwrap();
    assert_eq!(permutation, vec![3, 1, 0, 2]);

    let requests = server.join().unwrap();
    let params = &requests[0]["params"];
    assert_eq!(requests[0]["method"], "generateIntegers");
    assert_eq!(requests[0]["jsonrpc"], "2.0");
    assert_eq!(params["apiKey"], KEY);
    assert_eq!(params["n"], 4);
    assert_eq!(params["min"], 0);
    assert_eq!(params["max"], 3);
    assert_eq!(params["replacement"], false);
}

#[test]
fn test_short_response_is_protocol_error() {
    let (url, server) = serve(1, |req| (200, reply_with(req, &[1, 0], 0)));

    let err = client(&url, Duration::from_secs(5))
        .generate_permutation(3)
        .unwrap_err();
    assert!(err.is_protocol(), "unexpected error: {}", err);
    server.join().unwrap();
}

#[test]
fn test_repeated_values_are_protocol_error() {
    let (url, server) = serve(1, |req| (200, reply_with(req, &[1, 1, 0], 0)));

    let err = client(&url, Duration::from_secs(5))
        .generate_permutation(3)
        .unwrap_err();
    assert!(err.is_protocol());
    server.join().unwrap();
}

#[test]
fn test_rpc_error_is_protocol_error() {
    let (url, server) = serve(1, |req| {
        let body = json!({
            "jsonrpc": "2.0",
            "error": { "code": 402, "message": "The API key you specified has exceeded its daily request allowance", "data": null },
            "id": req["id"]
        });
        (200, body.to_string())
    });

    let err = client(&url, Duration::from_secs(5))
        .generate_permutation(3)
        .unwrap_err();
    assert!(err.is_protocol());
    assert!(err.to_string().contains("402"));
    server.join().unwrap();
}

#[test]
fn test_non_json_body_is_protocol_error() {
    let (url, server) = serve(1, |_| (200, "<html>maintenance</html>".to_string()));

    let err = client(&url, Duration::from_secs(5))
        .generate_permutation(2)
        .unwrap_err();
    assert!(err.is_protocol());
    server.join().unwrap();
}

#[test]
fn test_http_error_status_is_transport_error() {
    let (url, server) = serve(1, |_| (503, "{}".to_string()));

    let err = client(&url, Duration::from_secs(5))
        .generate_permutation(2)
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("503"));
    server.join().unwrap();
}

#[test]
fn test_timeout_is_transport_error() {
    // Bound but never accepted: the connection sits in the backlog.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());

    let err = client(&url, Duration::from_millis(200))
        .generate_permutation(3)
        .unwrap_err();
    assert!(err.is_transport(), "unexpected error: {}", err);
    drop(listener);
}

#[test]
fn test_connection_refused_is_transport_error() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let url = format!("http://{}/", addr);

    let err = client(&url, Duration::from_secs(2))
        .generate_permutation(3)
        .unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_timeout_leaves_filter_result_intact() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let source = client(&url, Duration::from_millis(200));

    let roster = vec![Member::boss("Alex"), Member::worker("Sam"), Member::worker("Pat")];
    let directives = RunDirectives::builder().guest("Bob").build();

    let err = todays_order(&roster, &directives, &source).unwrap_err();
    assert!(err.is_transport());
    assert_eq!(filter(&roster, &directives), vec!["Sam", "Pat", "Bob"]);
    drop(listener);
}

#[test]
fn test_todays_order_end_to_end() {
    let (url, server) = serve(1, |req| (200, reply_with(req, &[2, 0, 1], 0)));
    let source = client(&url, Duration::from_secs(5));

    let roster = vec![Member::boss("Alex"), Member::worker("Sam")];
    let directives = RunDirectives::builder().with_boss(true).guest("Bob").build();

    let order = todays_order(&roster, &directives, &source).unwrap();
    assert_eq!(order, vec!["Bob", "Alex", "Sam"]);
    server.join().unwrap();
}

#[test]
fn test_single_attendee_makes_no_request() {
    // Nothing listens here; a request would fail.
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let source = client(&format!("http://{}/", addr), Duration::from_secs(1));

    let order = todays_order(&[Member::worker("Sam")], &RunDirectives::default(), &source).unwrap();
    assert_eq!(order, vec!["Sam"]);
}

#[test]
fn test_advisory_delay_is_honored() {
    let (url, server) = serve(2, |req| (200, reply_with(req, &[1, 0], 300)));
    let source = client(&url, Duration::from_secs(5));

    let started = Instant::now();
    source.generate_permutation(2).unwrap();
    source.generate_permutation(2).unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));

    let requests = server.join().unwrap();
    assert_ne!(requests[0]["id"], requests[1]["id"]);
}
