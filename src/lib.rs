//! HTTP Message Value Objects.
//!
//! In-memory representation and string level (de)serialization of HTTP
//! messages: [`Uri`] components, [`Header`] fields and stream backed message
//! [`Body`], plus the thin containers composed out of them.
//!
//! No transport lives here. Sockets, wire parsing of full messages, TLS and
//! routing belong to whatever layer supplies the stream resources.
#![warn(missing_debug_implementations)]

mod log;

pub mod uri;
pub mod header;
pub mod body;

pub mod cookie;
pub mod map;
pub mod event;

mod request;
mod response;

pub use uri::Uri;
pub use header::{Header, Headers};
pub use body::Body;
pub use cookie::Cookie;
pub use map::Map;
pub use request::Request;
pub use response::Response;
