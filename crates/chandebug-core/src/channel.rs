//! Debug channels and the handles used to emit on them.
//!
//! A channel line looks like this on a pipe or file:
//!
//! ```text
//! 2026-01-21T14:30:45.123Z api:http request handled in 12ms
//! ```
//!
//! and like this on a terminal, with the name and elapsed suffix coloured:
//!
//! ```text
//! api:http request handled in 12ms  +340ms
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;

use crate::colour::Colour;
use crate::error::DebugResult;
use crate::history::{HistoryBuffer, HistoryRecord};
use crate::sink::LineSink;
use crate::time::format_elapsed;

/// Where every channel of a context writes to.
pub(crate) struct ChannelOutput {
    pub(crate) history: HistoryBuffer,
    pub(crate) sink: Box<dyn LineSink>,
}

/// Per-channel output decisions, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChannelPolicy {
    /// Prefix lines with an RFC 3339 timestamp
    pub(crate) prefix_date: bool,
    /// Append the time since the previous emission
    pub(crate) suffix_elapsed: bool,
}

#[derive(Debug)]
struct ChannelState {
    enabled: bool,
    colour: Option<Colour>,
    last_emit: Option<DateTime<Utc>>,
}

/// Read-only snapshot of a channel's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: String,
    pub colour: Option<Colour>,
    pub enabled: bool,
    pub prefix_date: bool,
    pub suffix_elapsed: bool,
    pub last_emit: Option<DateTime<Utc>>,
}

/// State and emit logic of one named channel.
pub(crate) struct ChannelInstance {
    name: String,
    policy: ChannelPolicy,
    output: Arc<ChannelOutput>,
    state: Mutex<ChannelState>,
}

impl ChannelInstance {
    pub(crate) fn new(
        name: impl Into<String>,
        enabled: bool,
        colour: Option<Colour>,
        policy: ChannelPolicy,
        output: Arc<ChannelOutput>,
    ) -> Self {
        let instance = Self {
            name: name.into(),
            policy,
            output,
            state: Mutex::new(ChannelState {
                enabled,
                colour: None,
                last_emit: None,
            }),
        };
        instance.set_colour(colour);
        instance
    }

    /// Replace the colour. Code and escape sequences change together.
    pub(crate) fn set_colour(&self, colour: Option<Colour>) {
        self.state.lock().colour = colour;
    }

    fn emit_at(&self, now: DateTime<Utc>, args: fmt::Arguments<'_>) -> DebugResult<()> {
        let (colour, previous) = {
            let mut state = self.state.lock();
            if !state.enabled {
                return Ok(());
            }
            let previous = state.last_emit.replace(now);
            (state.colour.clone(), previous)
        };

        let message = fmt::format(args);
        let line = self.compose(now, previous, colour.as_ref(), &message);

        self.output
            .history
            .add(HistoryRecord::new(now, self.name.as_str(), message));

        if let Err(e) = self.output.sink.write_line(&line) {
            tracing::warn!(channel = %self.name, error = %e, "debug sink write failed");
            return Err(e.into());
        }
        Ok(())
    }

    fn compose(
        &self,
        now: DateTime<Utc>,
        previous: Option<DateTime<Utc>>,
        colour: Option<&Colour>,
        message: &str,
    ) -> String {
        let (start, end) = colour.map(|c| (c.start(), c.end())).unwrap_or(("", ""));

        let mut line = String::with_capacity(self.name.len() + message.len() + 48);
        if self.policy.prefix_date {
            line.push_str(&now.to_rfc3339_opts(SecondsFormat::Millis, true));
            line.push(' ');
        }
        line.push_str(start);
        line.push_str(&self.name);
        line.push_str(end);
        line.push(' ');
        line.push_str(message);

        if self.policy.suffix_elapsed {
            if let Some(previous) = previous {
                let elapsed = (now - previous).num_milliseconds().max(0) as u64;
                line.push(' ');
                line.push_str(start);
                line.push_str(" +");
                line.push_str(&format_elapsed(elapsed));
                line.push_str(end);
            }
        }
        line
    }

    fn snapshot(&self) -> ChannelConfig {
        let state = self.state.lock();
        ChannelConfig {
            name: self.name.clone(),
            colour: state.colour.clone(),
            enabled: state.enabled,
            prefix_date: self.policy.prefix_date,
            suffix_elapsed: self.policy.suffix_elapsed,
            last_emit: state.last_emit,
        }
    }
}

/// Handle to a debug channel.
///
/// Handles are cheap to clone; every handle for the same name within a
/// context shares one underlying channel.
#[derive(Clone)]
pub struct Debugger {
    instance: Arc<ChannelInstance>,
}

impl Debugger {
    pub(crate) fn new(instance: ChannelInstance) -> Self {
        Self {
            instance: Arc::new(instance),
        }
    }

    pub fn name(&self) -> &str {
        &self.instance.name
    }

    /// Emit a formatted message. Does nothing while the channel is disabled.
    ///
    /// Usually called through the [`debug!`](crate::debug) macro.
    pub fn emit(&self, args: fmt::Arguments<'_>) -> DebugResult<()> {
        self.instance.emit_at(Utc::now(), args)
    }

    /// Emit a plain message.
    pub fn emit_str(&self, message: &str) -> DebugResult<()> {
        self.emit(format_args!("{}", message))
    }

    /// Emit with an explicit timestamp instead of the current time.
    pub fn emit_at(&self, now: DateTime<Utc>, args: fmt::Arguments<'_>) -> DebugResult<()> {
        self.instance.emit_at(now, args)
    }

    pub fn is_enabled(&self) -> bool {
        self.instance.state.lock().enabled
    }

    /// Enable or disable the channel, starting with the next emit.
    pub fn set_enabled(&self, enabled: impl Into<bool>) {
        let enabled = enabled.into();
        self.instance.state.lock().enabled = enabled;
        tracing::trace!(channel = %self.instance.name, enabled, "debug channel toggled");
    }

    /// Snapshot of the channel's current state.
    pub fn config(&self) -> ChannelConfig {
        self.instance.snapshot()
    }

    /// Whether both handles refer to the same channel.
    pub fn same_channel(&self, other: &Debugger) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for Debugger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("name", &self.instance.name)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Emit a formatted message on a [`Debugger`].
///
/// ```ignore
/// let db = ctx.create("db:pool");
/// chandebug_core::debug!(db, "acquired connection {} after {} tries", id, tries)?;
/// ```
#[macro_export]
macro_rules! debug {
    ($channel:expr, $($arg:tt)+) => {
        $channel.emit(::std::format_args!($($arg)+))
    };
}
