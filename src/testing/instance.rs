use std::io;
use std::net::SocketAddr;

use actix_web::dev::{Service, ServerHandle};
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use super::routes;
use super::stub::{RecordedRequest, StubState};
use crate::config::{ApiConfig, SuiteConfig};
use crate::fixtures::Fixtures;

/// Stub user service listening on an ephemeral localhost port
///
/// Must be started from within an actix system (e.g. `#[actix_web::test]`).
/// The server stops when the handle is dropped.
pub struct StubServer {
    addr: SocketAddr,
    state: Data<StubState>,
    handle: ServerHandle,
}

impl StubServer {
    pub async fn start(fixtures: &Fixtures, password: &str) -> io::Result<Self> {
        let state = Data::new(StubState::new(fixtures, password));
        let data = state.clone();

        let server = HttpServer::new(move || {
            let recorder = data.clone();

            App::new()
                .app_data(data.clone())
                .wrap_fn(move |req, srv| {
                    recorder.record(RecordedRequest {
                        method: req.method().clone(),
                        path: req.path().to_string(),
                        query: req.query_string().to_string(),
                        has_cookie: req.headers().contains_key(header::COOKIE),
                    });

                    srv.call(req)
                })
                .configure(routes::route)
        })
        .workers(1)
        .disable_signals()
        .shutdown_timeout(1)
        .bind(("127.0.0.1", 0))?;

        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| io::Error::other("stub server did not bind an address"))?;

        let server = server.run();
        let handle = server.handle();

        actix_web::rt::spawn(server);

        tracing::debug!(%addr, "Stub user service started");

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &StubState {
        &self.state
    }

    /// Suite configuration pointing at this stub
    pub fn config(&self) -> SuiteConfig {
        SuiteConfig {
            api: ApiConfig {
                base_url: self.base_url(),
                timeout_secs: 5,
                ..ApiConfig::default()
            },
            ..SuiteConfig::default()
        }
    }

    pub async fn stop(&self) {
        self.handle.stop(false).await;
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        // The stop command is sent eagerly; awaiting only waits for completion.
        drop(self.handle.stop(false));
    }
}
