//! Portability layer of the fabric transport: a poll(2)-backed event
//! multiplexer, capability direction rules and a few leaf helpers.

#![cfg(unix)]

pub mod caps;
pub mod config;
pub mod datatype;
pub mod logger;
pub mod os;
pub mod tag;
pub mod util;

pub use caps::Caps;
pub use config::MuxConfig;
pub use os::{EventMultiplexer, OsError, Token};
