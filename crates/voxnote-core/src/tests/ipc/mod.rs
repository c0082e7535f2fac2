#[cfg(unix)]
mod client;
mod codec;
mod wire;
