//! Development server with watch-mode rebuilds.

mod path;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::cli::{build::build_site, watch};
use crate::config::{SiteConfig, cfg, clear_clean_flag};
use crate::core::register_server;
use crate::log;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Build once, bind the server, and serve until shutdown.
///
/// The initial build failing is not fatal: the error is reported and the
/// server starts anyway, so a watch-mode edit can repair the site without
/// restarting.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    if let Err(e) = build_site(config, false) {
        log!("error"; "initial build failed: {:#}", e);
    }
    // Watch rebuilds must not wipe the output directory again
    clear_clean_flag();

    let bound = bind_server()?;
    bound.run()
}

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        shutdown_rx,
    })
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let watcher = config
            .serve
            .watch
            .then(|| watch::spawn_watcher(self.shutdown_rx.clone()))
            .flatten();

        run_request_loop(&self.server);
        wait_for_shutdown(watcher);
        Ok(())
    }
}

fn run_request_loop(server: &Server) {
    let config = cfg();
    // Handle requests concurrently so a slow transfer doesn't block others
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if let Some(path) = path::resolve_path(request.url(), &config.build.output) {
        return response::respond_file(request, &path);
    }

    response::respond_not_found(request, config)
}

/// Wait for the watcher thread to finish (max 2 seconds).
fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
}
