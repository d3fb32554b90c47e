//! End-to-end tests with tables served over HTTP.
//!
//! A plain blocking stub server runs on its own thread; the binary under
//! test connects to it like it would to a real export endpoint.

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

use crate::common::TestProject;
use crate::fixtures::{ConfigFixture, TableFixture};

/// Start a stub HTTP server answering `(path, status, body)` routes.
/// Returns its base URL; the serving thread lives until the process exits.
fn spawn_stub_server(routes: Vec<(&str, u16, &str)>) -> String {
    let routes: Vec<(String, u16, String)> = routes
        .into_iter()
        .map(|(path, status, body)| (path.to_string(), status, body.to_string()))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };

            let mut reader = BufReader::new(match stream.try_clone() {
                Ok(clone) => clone,
                Err(_) => continue,
            });
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
                continue;
            }
            let path =
                request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            // Drain the headers before answering.
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap_or(0) > 0 {
                if line == "\r\n" || line == "\n" {
                    break;
                }
                line.clear();
            }

            let (status, body) = routes
                .iter()
                .find(|(route, _, _)| *route == path)
                .map_or((404, ""), |(_, status, body)| (*status, body.as_str()));
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}")
}

const RPC_BODY: &str = "rpc_name,rpc_class\ntestRI,jp.co.testRIclass\n";
const JS_BODY: &str = "rpc_name,js_class,file_path\ntestRI,TestRIImpl,src/rpc/testRI.js\n";

#[test]
fn search_works_over_http() -> Result<()> {
    let base_url = spawn_stub_server(vec![
        ("/rpc-mappings.csv", 200, RPC_BODY),
        ("/js-mappings.csv", 200, JS_BODY),
    ]);

    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::base_url(&base_url).content)?;

    let output = project.run(&["search", "jp.co.testRIclass"])?;
    output.assert_success().assert_stdout_contains("TestRIImpl");
    Ok(())
}

#[test]
fn stats_names_the_http_source() -> Result<()> {
    let base_url = spawn_stub_server(vec![
        ("/rpc-mappings.csv", 200, RPC_BODY),
        ("/js-mappings.csv", 200, JS_BODY),
    ]);

    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::base_url(&base_url).content)?;

    let output = project.run(&["stats"])?;
    output
        .assert_success()
        .assert_stdout_contains(&format!("Source: base URL {base_url}"))
        .assert_stdout_contains("RPC mappings: 1");
    Ok(())
}

#[test]
fn http_error_status_is_reported() -> Result<()> {
    // Only the rpc table is routed; the js table fetch gets a 404.
    let base_url = spawn_stub_server(vec![("/rpc-mappings.csv", 200, RPC_BODY)]);

    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::base_url(&base_url).content)?;

    let output = project.run(&["search", "jp.co.testRIclass"])?;
    output
        .assert_failure()
        .assert_code(1)
        .assert_stderr_contains("js-mappings table unavailable")
        .assert_stderr_contains("returned HTTP 404");
    Ok(())
}

#[test]
fn quoted_fixture_survives_the_http_round_trip() -> Result<()> {
    let fixture = TableFixture::quoted();
    let base_url = spawn_stub_server(vec![
        ("/rpc-mappings.csv", 200, fixture.rpc.as_str()),
        ("/js-mappings.csv", 200, fixture.js.as_str()),
    ]);

    let project = TestProject::new()?;
    project.write_config(&ConfigFixture::base_url(&base_url).content)?;

    let output = project.run(&["search", "jp.co.quoted,WithComma"])?;
    output.assert_success().assert_stdout_contains("src/odd,dir/quoted.js");
    Ok(())
}
