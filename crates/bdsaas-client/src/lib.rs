//! Client for the bdsaas telephony open API.
//!
//! The service exposes seat phone lines that can place outbound calls, and
//! keeps a record (and usually a recording) of every call. This crate wraps
//! its HTTP+JSON convention:
//!
//! - [`Client`] - seats, call, query, download_recording
//! - [`Envelope`] - the `rspCode`/`rspMsg`/`data` wrapper around every response
//! - [`CallRecord`] / [`Recording`] - what the service hands back
//! - [`ClientError`] - one error type, categorized by [`ErrorKind`]
//!
//! # Example
//!
//! ```no_run
//! use bdsaas_client::{CallOptions, Client};
//!
//! # async fn run() -> bdsaas_client::ClientResult<()> {
//! let client = Client::new("my-app-key")?;
//!
//! let seats = client.seats().await?;
//! let session = client
//!     .call(&seats[0], "13900000000", &CallOptions::new().with_notes("renewal"))
//!     .await?;
//!
//! for record in client.query(&[session.as_str()]).await? {
//!     println!("{} -> {}: {}", record.caller_num, record.callee_num, record.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod record;
pub mod recording;
mod transport;

pub use client::{CallOptions, Client};
pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use record::CallRecord;
pub use recording::Recording;
pub use reqwest::Method;
