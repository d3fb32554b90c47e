//! HTTP table fetching against an in-process stub server.
//!
//! The stub speaks just enough HTTP/1.1 for `reqwest`: it reads the request
//! line, matches the path against a fixed route table, and answers with a
//! `content-length` body on a closing connection.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use rpcfinder_cli::cache::MappingCache;
use rpcfinder_cli::config::LoadedConfig;
use rpcfinder_cli::core::FinderError;
use rpcfinder_cli::mappings::MappingRepository;
use rpcfinder_cli::search::SearchResolver;
use rpcfinder_cli::source::{ConfiguredSource, HttpTableSource, TableId, TableSource};
use rpcfinder_cli::test_utils::{JS_TABLE_BASIC, RPC_TABLE_BASIC};

struct StubServer {
    base_url: String,
    task: tokio::task::JoinHandle<()>,
}

impl StubServer {
    /// Start a server answering the given `(path, status, body)` routes.
    /// Unrouted paths get a 404 with an empty body.
    async fn start(routes: &[(&str, u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Vec<(String, u16, String)> = routes
            .iter()
            .map(|(path, status, body)| ((*path).to_string(), *status, (*body).to_string()))
            .collect();

        let task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(handle_connection(stream, routes.clone()));
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            task,
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle_connection(mut stream: TcpStream, routes: Vec<(String, u16, String)>) {
    let mut buf = vec![0u8; 4096];
    let mut len = 0;
    while len < buf.len() {
        match stream.read(&mut buf[len..]).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                len += n;
                if buf[..len].windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let request = String::from_utf8_lossy(&buf[..len]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = routes
        .iter()
        .find(|(route, _, _)| route == path)
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
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

#[tokio::test]
async fn serves_both_tables_to_the_resolver() -> Result<()> {
    let server = StubServer::start(&[
        ("/rpc-mappings.csv", 200, RPC_TABLE_BASIC),
        ("/js-mappings.csv", 200, JS_TABLE_BASIC),
    ])
    .await;

    let source = HttpTableSource::new(server.base_url.clone());
    assert_eq!(source.describe(), format!("base URL {}", server.base_url));

    let resolver =
        SearchResolver::new(Arc::new(MappingCache::new(MappingRepository::new(source))));
    let result = resolver.resolve_exact("jp.co.testRIclass").await?;
    assert_eq!(result.rpc_name, "testRI");
    assert_eq!(result.js_mappings[0].js_class, "TestRIImpl");
    Ok(())
}

#[tokio::test]
async fn missing_table_reports_the_http_status() {
    let server = StubServer::start(&[("/rpc-mappings.csv", 200, RPC_TABLE_BASIC)]).await;

    let source = HttpTableSource::new(server.base_url.clone());
    let err = source.fetch(TableId::JsMappings).await.unwrap_err();

    match err.downcast_ref::<FinderError>() {
        Some(FinderError::SourceUnavailable { table, reason }) => {
            assert_eq!(*table, TableId::JsMappings);
            assert!(reason.contains("returned HTTP 404"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_fails_the_fetch_immediately() {
    let server =
        StubServer::start(&[("/rpc-mappings.csv", 500, "export job crashed")]).await;

    let source = HttpTableSource::new(server.base_url.clone());
    let err = source.fetch(TableId::RpcMappings).await.unwrap_err();

    match err.downcast_ref::<FinderError>() {
        Some(FinderError::SourceUnavailable { reason, .. }) => {
            assert!(reason.contains("500"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn configured_base_url_drives_the_whole_load() -> Result<()> {
    let server = StubServer::start(&[
        ("/rpc-mappings.csv", 200, RPC_TABLE_BASIC),
        ("/js-mappings.csv", 200, JS_TABLE_BASIC),
    ])
    .await;

    let temp = tempfile::TempDir::new()?;
    let config_path = temp.path().join("rpcfinder.toml");
    std::fs::write(
        &config_path,
        format!("[source]\nbase_url = \"{}\"\n", server.base_url),
    )?;

    let loaded = LoadedConfig::from_file(config_path).await?;
    let source = loaded.source();
    assert!(matches!(source, ConfiguredSource::Http(_)));

    let set = MappingRepository::new(source).load().await?;
    assert_eq!(set.rpc_count(), 2);
    assert_eq!(set.js_count(), 2);
    Ok(())
}
