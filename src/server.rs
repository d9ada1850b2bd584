use anyhow::Result;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use uuid::Uuid;

use crate::engine;
use crate::types::{ComputeRequest, ComputeResponse};

/// Line-oriented compute endpoint: one JSON request per line in, one JSON
/// response per line out. Connections share nothing, so each one runs on
/// its own task.
pub struct ComputeServer {
    listener: TcpListener,
}

impl ComputeServer {
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("compute server listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    /// Actual bound address, useful when binding port 0.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn serve(&self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("connection from {}", addr);
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream).await {
                            error!("error handling client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("failed to accept connection: {}", e);
                }
            }
        }
    }
}

async fn handle_client(mut stream: TcpStream) -> Result<()> {
    let (reader, mut writer) = stream.split();
    let mut buf_reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        match buf_reader.read_line(&mut line).await {
            Ok(0) => break, // Connection closed
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let response = dispatch(trimmed);
                let response_json = serde_json::to_string(&response)?;
                writer.write_all(format!("{}\n", response_json).as_bytes()).await?;
                writer.flush().await?;
            }
            Err(e) => {
                error!("error reading from client: {}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Parses and runs one request. Every failure comes back as a single
/// `{"error": ...}` object so the caller never loses the connection over
/// bad input.
fn dispatch(raw: &str) -> ComputeResponse {
    let request_id = Uuid::new_v4();
    let request: ComputeRequest = match serde_json::from_str(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!("[{}] invalid request: {}", request_id, e);
            return ComputeResponse::Failure { error: format!("invalid request: {}", e) };
        }
    };

    info!(
        "[{}] compute: algo={} links={} metrics={}",
        request_id,
        request.algo,
        request.topo.len(),
        request.metric.len()
    );
    match engine::compute(&request) {
        Ok(results) => {
            info!("[{}] done: {} result slots", request_id, results.len());
            ComputeResponse::Results(results)
        }
        Err(err) => {
            warn!("[{}] rejected: {}", request_id, err);
            ComputeResponse::Failure { error: err.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_unknown_algorithm() {
        let raw = json!({"topo": [], "algo": "foo"}).to_string();
        let response = dispatch(&raw);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Algorithm not recognized."})
        );
    }

    #[test]
    fn test_dispatch_malformed_json() {
        let response = dispatch("{not json");
        match response {
            ComputeResponse::Failure { error } => {
                assert!(error.starts_with("invalid request:"), "{error}");
            }
            ComputeResponse::Results(_) => panic!("malformed input accepted"),
        }
    }

    #[test]
    fn test_dispatch_missing_required_field() {
        let raw = json!({"algo": "dijkstra_path"}).to_string();
        let response = dispatch(&raw);
        match response {
            ComputeResponse::Failure { error } => {
                assert!(error.starts_with("invalid request:"), "{error}");
            }
            ComputeResponse::Results(_) => panic!("incomplete request accepted"),
        }
    }

    #[test]
    fn test_dispatch_computes_paths() {
        let raw = json!({
            "topo": [
                {"source": "openflow:1", "target": "openflow:2"},
                {"source": "openflow:2", "target": "openflow:3"},
            ],
            "algo": "shortest_path",
        })
        .to_string();
        let response = dispatch(&raw);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["openflow:1_openflow:3"],
            json!([["openflow:1", "openflow:2", "openflow:3"]])
        );
    }
}
