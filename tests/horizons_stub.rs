//! Horizons client against a one-shot local HTTP server serving canned answers
mod common;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use common::observing_time;
use skyresolve::env_state::{ResolverConfig, ResolverEnv};
use skyresolve::jpl_request::horizons_client::HorizonsClient;
use skyresolve::{CoordinateResolver, ObjectId, SkyResolveError};

const CERES_ANSWER: &str = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
Target body name: 1 Ceres (A801 AA)               {source: JPL#48}
Center body name: Earth (399)                     {source: DE441}
*******************************************************************************
 Date__(UT)__HR:MN, , , R.A.___(ICRF), DEC____(ICRF),
*******************************************************************************
$$SOE
 2021-Oct-18 09:30, , ,  70.86811,  16.21255,
$$EOE
*******************************************************************************
";

const NOT_FOUND_ANSWER: &str = "API VERSION: 1.2
API SOURCE: NASA/JPL Horizons API

*******************************************************************************
Horizons> foobarbaz
>>> Small-body Index Search Results <<<
  No matches found.
*******************************************************************************
";

/// Serve `answers` in order, one connection each, and hand back the request lines received
fn serve(answers: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/horizons.api", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut request_lines = Vec::new();
        for (status, body) in answers {
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
            let request = String::from_utf8_lossy(&request);
            request_lines.push(request.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
        request_lines
    });
    (url, handle)
}

fn client_for(url: String) -> HorizonsClient {
    HorizonsClient::new(ResolverEnv::with_config(ResolverConfig {
        horizons_url: url,
        ..ResolverConfig::default()
    }))
}

#[test]
fn test_resolve_through_http() {
    let (url, server) = serve(vec![("200 OK", CERES_ANSWER), ("200 OK", NOT_FOUND_ANSWER)]);
    let resolver = CoordinateResolver::new(client_for(url));

    let report = resolver
        .resolve_report(&observing_time(), ["ceres", "foobarbaz"])
        .unwrap();

    assert_eq!(report.coordinates["ceres"], "4h43m28.3464s16d12m45.18s");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].error,
        SkyResolveError::ObjectNotFound(ObjectId::from("foobarbaz"))
    );

    let request_lines = server.join().unwrap();
    assert_eq!(request_lines.len(), 2);
    for line in &request_lines {
        assert!(line.starts_with("GET /api/horizons.api?"), "{line}");
        assert!(line.contains("format=text"), "{line}");
        assert!(line.contains("COMMAND="), "{line}");
        assert!(line.contains("TLIST="), "{line}");
    }
}

#[test]
fn test_http_error_aborts_the_batch() {
    let (url, server) = serve(vec![("503 Service Unavailable", "maintenance")]);
    let resolver = CoordinateResolver::new(client_for(url));

    let result = resolver.resolve(&observing_time(), ["ceres", "vesta"]);
    assert!(matches!(result, Err(SkyResolveError::UreqHttpError(_))));
    assert_eq!(server.join().unwrap().len(), 1);
}
