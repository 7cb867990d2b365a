//! chandebug Core Library
//!
//! Named, independently switchable debug channels for long-running and CLI
//! processes.
//!
//! ## Overview
//!
//! Each channel is created once per name and decides at creation whether it
//! is enabled, using a filter expression (the `DEBUG` environment variable by
//! default). Enabled channels write one line per call to a sink: on a
//! terminal the channel name is coloured and the time since the channel's
//! previous line is appended; elsewhere each line is prefixed with an
//! RFC 3339 timestamp. Disabled channels do nothing at all.
//!
//! ```text
//! DEBUG=api*,-api:health  my-service
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chandebug_core::{debug, DebugConfig, DebugContext, StdoutSink};
//!
//! let ctx = DebugContext::new(DebugConfig::from_env(), StdoutSink);
//! let http = ctx.create("api:http");
//!
//! debug!(http, "listening on {}", addr)?;
//!
//! // Recent lines stay available for inspection
//! for record in ctx.history().snapshot() {
//!     println!("{} {} {}", record.when, record.who, record.log);
//! }
//! ```

pub mod channel;
pub mod colour;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod history;
pub mod sink;
pub mod time;

// Re-exports
pub use channel::{ChannelConfig, Debugger};
pub use colour::{Colour, ColourAllocator, ColourStrategy, DEFAULT_PALETTE};
pub use config::{ColourMode, DebugConfig, ENV_FILTER, ENV_HIDE_DATE};
pub use context::{create_debug, global, DebugContext};
pub use error::{DebugError, DebugResult};
pub use filter::{is_enabled, FilterExpr, Pattern};
pub use history::{HistoryBuffer, HistoryRecord, DEFAULT_HISTORY_CAPACITY};
pub use sink::{FileSink, LineSink, MemorySink, StdoutSink, TracingSink, WriterSink};
pub use time::format_elapsed;
