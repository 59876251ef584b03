//! Network actor - runs HTTP requests in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, execute_request};

/// Network actor that processes HTTP request commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                let url = request.full_url();
                                tracing::info!(id, %url, method = request.method.as_str(), "Executing request");
                                let attempt = execute_request(&client, &request).await;
                                match &attempt.outcome {
                                    Ok(record) => tracing::info!(
                                        id,
                                        status = %record.status,
                                        elapsed_ms = attempt.time_ms,
                                        "Request completed"
                                    ),
                                    Err(e) => tracing::warn!(
                                        id,
                                        error = %e,
                                        elapsed_ms = attempt.time_ms,
                                        "Request failed"
                                    ),
                                }
                                let _ = response_tx.send(NetworkResponse::from_attempt(id, attempt));
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestState;

    #[tokio::test]
    async fn test_unreachable_host_reports_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(resp_tx).run(cmd_rx));

        let request = RequestState {
            base_url: format!("http://127.0.0.1:{port}"),
            ..RequestState::default()
        };
        cmd_tx.send(NetworkCommand::ExecuteRequest { id: 7, request }).unwrap();

        match resp_rx.recv().await {
            Some(NetworkResponse::Error { id, .. }) => assert_eq!(id, 7),
            other => panic!("unexpected response: {other:?}"),
        }
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    }
}
