//! File watcher for serve mode.
//!
//! Watches the content and layout trees and triggers quiet rebuilds.
//! Rebuild results go through the single-line watch status display so
//! repeated saves don't scroll the terminal.

use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam::channel;
use notify::{RecursiveMode, Watcher};

use crate::cli::build::build_site;
use crate::config::cfg;
use crate::core::{ChangeKind, Debouncer, is_shutdown};
use crate::logger::{status_error, status_success};
use crate::{debug, log};

/// Spawn the watcher thread. Returns `None` if the watcher could not be
/// set up (the server keeps running without live rebuilds).
pub fn spawn_watcher(shutdown_rx: channel::Receiver<()>) -> Option<JoinHandle<()>> {
    let config = cfg();
    let roots = vec![config.build.content.clone(), config.build.layouts.clone()];

    let (event_tx, event_rx) = channel::unbounded::<notify::Event>();

    let mut watcher = match notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = event_tx.send(event);
        }
    }) {
        Ok(w) => w,
        Err(e) => {
            log!("watch"; "failed to create watcher: {e}");
            return None;
        }
    };

    let mut watched = Vec::new();
    for root in &roots {
        if !root.exists() {
            debug!("watch"; "skipping missing directory {}", root.display());
            continue;
        }
        if let Err(e) = watcher.watch(root, RecursiveMode::Recursive) {
            log!("watch"; "failed to watch {}: {e}", root.display());
            continue;
        }
        watched.push(config.root_relative(root).display().to_string());
    }

    if watched.is_empty() {
        log!("watch"; "nothing to watch");
        return None;
    }

    log!("watch"; "watching {}", watched.join(", "));

    let handle = std::thread::spawn(move || {
        // Keep the watcher alive for the thread's lifetime
        let _watcher = watcher;
        watch_loop(&event_rx, &shutdown_rx);
    });

    Some(handle)
}

/// Debounce events into batches and rebuild once per batch.
fn watch_loop(event_rx: &channel::Receiver<notify::Event>, shutdown_rx: &channel::Receiver<()>) {
    let mut debouncer = Debouncer::new();

    loop {
        if is_shutdown() {
            return;
        }

        let timeout = debouncer.sleep_duration().min(Duration::from_millis(250));

        channel::select! {
            recv(event_rx) -> event => {
                match event {
                    Ok(event) => debouncer.add_event(&event),
                    // Watcher dropped its sender; nothing left to watch
                    Err(_) => return,
                }
            }
            recv(shutdown_rx) -> _ => return,
            default(timeout) => {}
        }

        if let Some(changes) = debouncer.take_if_ready() {
            rebuild(&changes);
        }
    }
}

/// Run a quiet rebuild and report the outcome on the status line.
///
/// A failed rebuild must not take the server down: the error stays on
/// screen until the next save repairs it.
fn rebuild(changes: &rustc_hash::FxHashMap<PathBuf, ChangeKind>) {
    let config = cfg();
    let summary = describe_changes(changes);

    match build_site(&config, true) {
        Ok(_) => status_success(&format!("rebuilt: {summary}")),
        Err(e) => status_error(&format!("failed: {summary}"), &format!("{e:#}")),
    }
}

/// Short human summary of a change batch, e.g.
/// `content/articles/hello.md modified` or `3 files changed`.
fn describe_changes(changes: &rustc_hash::FxHashMap<PathBuf, ChangeKind>) -> String {
    let config = cfg();

    if changes.len() == 1 {
        let (path, kind) = changes.iter().next().expect("len checked");
        return format!(
            "{} {}",
            config.root_relative(path).display(),
            kind.label()
        );
    }

    format!("{} changed", crate::utils::plural::plural_count(changes.len(), "file"))
}
