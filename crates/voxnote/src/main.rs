//! VoxNote: voice-recording client with a hotkey-driven session controller
//! and a live transcript display, talking to a native backend over IPC.

mod affordance;
mod app;
mod config;
mod controller_event;
mod countdown_guard;
mod error;
mod hotkey_handler;
mod notifier;
mod recording_controller;
mod session_status;
mod transcript_view;

pub(crate) use {
    affordance::{AffordanceLabel, AmplitudeSnapshot},
    app::App,
    controller_event::ControllerEvent,
    countdown_guard::CountdownGuard,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    notifier::{Alert, DesktopNotifier},
    recording_controller::RecordingController,
    session_status::SessionStatus,
    transcript_view::{ConsoleViewport, TranscriptView},
};

use crate::config::Config;

use std::{sync::Arc, time::Instant};

use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use uuid::Uuid;
use voxnote_core::{RecorderBackend, SocketBackend};

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("voxnote=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // Register on the main thread -- on Windows the hotkey needs its
    // messages pumped there. The manager must outlive the runtime; dropping
    // it unregisters the hotkey.
    let (_hotkey_manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to register hotkey: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let backend: Arc<dyn RecorderBackend> = Arc::new(SocketBackend::new(
            config.backend.socket_path(),
            config.backend.connect_timeout(),
            config.backend.request_timeout(),
        ));

        // Mount reconciliation: adopt a session the backend already has
        // (e.g. the client crashed and restarted mid-recording).
        let initial_status = match backend.is_recording().await {
            Ok(true) => {
                let session_id = Uuid::new_v4();
                warn!(session_id = %session_id, "Backend already recording, adopting session");
                SessionStatus::Recording {
                    started_at: Instant::now(),
                    session_id,
                }
            }
            Ok(false) => SessionStatus::Idle,
            Err(e) => {
                warn!(error = ?e, "Recording state query failed at mount, assuming idle");
                SessionStatus::Idle
            }
        };

        let segment_rx = match backend.subscribe().await {
            Ok(rx) => rx,
            Err(e) => {
                // Recording still works without the stream; hand the
                // controller a closed channel.
                warn!(error = ?e, "Transcript stream unavailable");
                mpsc::channel(1).1
            }
        };

        let (actuation_tx, actuation_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (_amplitude_tx, amplitude_rx) = watch::channel(AmplitudeSnapshot::default());

        let hotkey_handler = HotkeyHandler::new(hotkey_id, actuation_tx);

        let alerter: Arc<dyn Alert> = Arc::new(DesktopNotifier::new(config.notifications.enabled));
        let controller = RecordingController::new(
            backend,
            alerter,
            event_tx,
            actuation_rx,
            segment_rx,
            initial_status,
        );

        let app = App {
            event_rx,
            amplitude_rx,
            transcripts: Vec::new(),
            view: TranscriptView::new(ConsoleViewport::default()),
            status: initial_status,
            shutdown_tx: shutdown_tx.clone(),
        };

        // Ctrl-C triggers the shutdown watch all three tasks listen on.
        let signal_shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, shutting down");
                let _ = signal_shutdown.send(true);
            }
        });

        tokio::join!(
            async {
                if let Err(e) = hotkey_handler.run(shutdown_rx.clone()).await {
                    error!(error = ?e, "Hotkey handler error");
                }
            },
            async {
                if let Err(e) = controller.run(shutdown_rx.clone()).await {
                    error!(error = ?e, "Recording controller error");
                }
            },
            async {
                if let Err(e) = app.run(shutdown_rx.clone()).await {
                    error!(error = ?e, "App error");
                }
            }
        );
    });
}
