//! Client side of the IPC boundary.
//!
//! [`RecorderBackend`] is the abstraction the recording controller depends
//! on; [`SocketBackend`] is the production implementation speaking the
//! length-prefixed JSON protocol over a local socket (Unix domain socket on
//! Unix, named pipe on Windows).

use crate::{
    IpcError, IpcResult, Request, Response, TranscriptEntry,
    ipc::codec::{read_json, write_json},
};

use std::{panic::Location, path::PathBuf, time::Duration};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::{
    io::{AsyncRead, AsyncWrite},
    sync::{Mutex, mpsc},
};
use tracing::{debug, error, info, instrument, warn};

/// Capacity of the transcript segment channel handed out by `subscribe`.
const SEGMENT_CHANNEL_CAPACITY: usize = 64;

/// Asynchronous client interface to the native recording backend.
///
/// Every call is fallible and every call is a suspension point; the caller's
/// thread is never blocked. Implementations must preserve segment emission
/// order end-to-end on the `subscribe` stream.
#[async_trait]
pub trait RecorderBackend: Send + Sync {
    /// Query whether the backend is currently capturing.
    async fn is_recording(&self) -> IpcResult<bool>;

    /// Begin audio capture.
    async fn start_recording(&self) -> IpcResult<()>;

    /// End audio capture and finalize the transcript.
    async fn stop_recording(&self) -> IpcResult<()>;

    /// Open the transcript segment stream.
    ///
    /// Segments arrive on the returned channel in backend emission order.
    /// The stream ends when the backend closes the connection or the
    /// receiver is dropped.
    async fn subscribe(&self) -> IpcResult<mpsc::Receiver<TranscriptEntry>>;
}

/// Default socket path for the backend connection.
///
/// Unix: `voxnote/backend.sock` under the platform runtime directory
/// (temp directory when the platform has none). Windows: a named pipe.
pub fn default_socket_path() -> PathBuf {
    #[cfg(unix)]
    {
        let runtime_dir = directories::BaseDirs::new()
            .and_then(|dirs| dirs.runtime_dir().map(PathBuf::from))
            .unwrap_or_else(std::env::temp_dir);
        runtime_dir.join("voxnote").join("backend.sock")
    }

    #[cfg(windows)]
    {
        PathBuf::from(r"\\.\pipe\voxnote-backend")
    }
}

// Object-safe alias for the platform stream behind the connection mutex.
trait IpcStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> IpcStream for T {}

/// Production [`RecorderBackend`] over a persistent local-socket connection.
///
/// One request/response exchange runs at a time: the connection sits behind
/// a mutex, which together with the controller's state machine serializes
/// `start`/`stop` traffic. Connects lazily; any IO failure drops the
/// connection so the next call reconnects.
pub struct SocketBackend {
    socket_path: PathBuf,
    connect_timeout: Duration,
    request_timeout: Duration,
    connection: Mutex<Option<Box<dyn IpcStream>>>,
}

impl SocketBackend {
    /// Create a client for the backend socket at `socket_path`.
    ///
    /// No connection is attempted until the first call.
    pub fn new(socket_path: PathBuf, connect_timeout: Duration, request_timeout: Duration) -> Self {
        Self {
            socket_path,
            connect_timeout,
            request_timeout,
            connection: Mutex::new(None),
        }
    }

    #[track_caller]
    async fn connect(&self) -> IpcResult<Box<dyn IpcStream>> {
        let caller = ErrorLocation::from(Location::caller());

        let connect = async {
            #[cfg(unix)]
            {
                let stream = tokio::net::UnixStream::connect(&self.socket_path).await?;
                Ok::<Box<dyn IpcStream>, IpcError>(Box::new(stream))
            }

            #[cfg(windows)]
            {
                use tokio::net::windows::named_pipe::ClientOptions;

                let pipe = ClientOptions::new().open(&self.socket_path)?;
                Ok::<Box<dyn IpcStream>, IpcError>(Box::new(pipe))
            }
        };

        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(stream)) => {
                info!(socket_path = ?self.socket_path, "Connected to recording backend");
                Ok(stream)
            }
            Ok(Err(e)) => Err(IpcError::ConnectionFailed {
                reason: format!("Failed to connect to {}: {}", self.socket_path.display(), e),
                location: caller,
            }),
            Err(_) => Err(IpcError::Timeout {
                seconds: self.connect_timeout.as_secs(),
                location: caller,
            }),
        }
    }

    /// Send one request and read its response on the persistent connection.
    ///
    /// Any failure drops the connection; the next call reconnects.
    #[instrument(skip(self))]
    async fn request(&self, request: Request) -> IpcResult<Response> {
        let mut conn = self.connection.lock().await;

        if conn.is_none() {
            *conn = Some(self.connect().await?);
        }

        let result = match conn.as_mut() {
            Some(stream) => {
                let exchange = async {
                    write_json(stream, &request).await?;
                    read_json::<_, Response>(stream).await
                };
                match tokio::time::timeout(self.request_timeout, exchange).await {
                    Ok(result) => result,
                    Err(_) => Err(IpcError::Timeout {
                        seconds: self.request_timeout.as_secs(),
                        location: ErrorLocation::from(Location::caller()),
                    }),
                }
            }
            None => Err(IpcError::ConnectionClosed {
                location: ErrorLocation::from(Location::caller()),
            }),
        };

        match result {
            Ok(Response::Error { message }) => {
                debug!(request = ?request, message = %message, "Backend rejected request");
                Err(IpcError::Backend {
                    message,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Ok(response) => Ok(response),
            Err(e) => {
                // Stale half-exchanged connections are worse than a
                // reconnect on the next call.
                *conn = None;
                Err(e)
            }
        }
    }

    #[track_caller]
    fn unexpected(expected: &'static str, got: Response) -> IpcError {
        IpcError::UnexpectedResponse {
            expected,
            got: got.kind().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait]
impl RecorderBackend for SocketBackend {
    #[instrument(skip(self))]
    async fn is_recording(&self) -> IpcResult<bool> {
        match self.request(Request::IsRecording).await? {
            Response::Recording { active } => Ok(active),
            other => Err(Self::unexpected("recording", other)),
        }
    }

    #[instrument(skip(self))]
    async fn start_recording(&self) -> IpcResult<()> {
        match self.request(Request::StartRecording).await? {
            Response::Started => Ok(()),
            other => Err(Self::unexpected("started", other)),
        }
    }

    #[instrument(skip(self))]
    async fn stop_recording(&self) -> IpcResult<()> {
        match self.request(Request::StopRecording).await? {
            Response::Stopped => Ok(()),
            other => Err(Self::unexpected("stopped", other)),
        }
    }

    /// Open a dedicated second connection for the segment stream, so pushed
    /// segments never interleave with request/response exchanges.
    #[instrument(skip(self))]
    async fn subscribe(&self) -> IpcResult<mpsc::Receiver<TranscriptEntry>> {
        let mut stream = self.connect().await?;

        write_json(&mut stream, &Request::Subscribe).await?;
        match read_json::<_, Response>(&mut stream).await? {
            Response::Subscribed => {}
            Response::Error { message } => {
                return Err(IpcError::Backend {
                    message,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            other => return Err(Self::unexpected("subscribed", other)),
        }

        info!("Subscribed to transcript segment stream");

        let (segment_tx, segment_rx) = mpsc::channel(SEGMENT_CHANNEL_CAPACITY);

        // Reader task forwards pushed segments in arrival order. Ends when
        // the backend hangs up or the receiver is dropped.
        tokio::spawn(async move {
            loop {
                match read_json::<_, Response>(&mut stream).await {
                    Ok(Response::Segment { entry }) => {
                        if segment_tx.send(entry).await.is_err() {
                            debug!("Segment receiver dropped, closing stream");
                            break;
                        }
                    }
                    Ok(other) => {
                        warn!(got = other.kind(), "Non-segment message on segment stream");
                    }
                    Err(IpcError::ConnectionClosed { .. }) => {
                        debug!("Segment stream closed by backend");
                        break;
                    }
                    Err(e) => {
                        error!(error = ?e, "Segment stream read failed");
                        break;
                    }
                }
            }
        });

        Ok(segment_rx)
    }
}
