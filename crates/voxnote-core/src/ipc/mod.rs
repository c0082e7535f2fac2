//! The IPC boundary to the native recording backend.

mod client;
mod codec;
mod request;
mod response;

pub use {
    client::{RecorderBackend, SocketBackend, default_socket_path},
    codec::{MAX_MESSAGE_SIZE, read_json, read_message, write_json, write_message},
    request::Request,
    response::Response,
};
