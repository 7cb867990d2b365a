//! The debug context: channel registry plus everything channels share.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  DebugContext                                        │
//! │  ├── filter: FilterExpr        (parsed once)         │
//! │  ├── colours: ColourAllocator  (cursor per context)  │
//! │  ├── channels: name → Debugger (never removed)       │
//! │  └── output                                          │
//! │      ├── history: HistoryBuffer                      │
//! │      └── sink: Box<dyn LineSink>                     │
//! └──────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::channel::{ChannelInstance, ChannelOutput, ChannelPolicy, Debugger};
use crate::colour::ColourAllocator;
use crate::config::DebugConfig;
use crate::filter::FilterExpr;
use crate::history::HistoryBuffer;
use crate::sink::{LineSink, StdoutSink};

/// Factory and registry for debug channels.
///
/// # Example
///
/// ```ignore
/// let ctx = DebugContext::new(DebugConfig::default().with_filter("db:*"), StdoutSink);
///
/// let pool = ctx.create("db:pool");
/// chandebug_core::debug!(pool, "opened {} connections", 4)?;
///
/// // Same name, same channel
/// assert!(pool.same_channel(&ctx.create("db:pool")));
/// ```
pub struct DebugContext {
    config: DebugConfig,
    filter: FilterExpr,
    colours: ColourAllocator,
    output: Arc<ChannelOutput>,
    channels: RwLock<HashMap<String, Debugger>>,
}

impl DebugContext {
    pub fn new(config: DebugConfig, sink: impl LineSink + 'static) -> Self {
        let filter = config
            .filter
            .as_deref()
            .map(FilterExpr::parse)
            .unwrap_or_default();
        let colours = ColourAllocator::new(config.palette.clone(), config.colour_strategy);
        let output = Arc::new(ChannelOutput {
            history: HistoryBuffer::new(config.history_capacity),
            sink: Box::new(sink),
        });

        Self {
            config,
            filter,
            colours,
            output,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Context configured from the environment, writing to stdout.
    pub fn from_env() -> Self {
        Self::new(DebugConfig::from_env(), StdoutSink)
    }

    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    /// Get the channel for `name`, creating it on first use.
    pub fn create(&self, name: &str) -> Debugger {
        if let Some(existing) = self.channels.read().get(name) {
            return existing.clone();
        }

        let mut channels = self.channels.write();
        channels
            .entry(name.to_string())
            .or_insert_with(|| self.build(name))
            .clone()
    }

    /// Look up an existing channel without creating it.
    pub fn get(&self, name: &str) -> Option<Debugger> {
        self.channels.read().get(name).cloned()
    }

    /// Names of all channels created so far, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.channels.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }

    /// History of emissions across all channels.
    pub fn history(&self) -> &HistoryBuffer {
        &self.output.history
    }

    fn build(&self, name: &str) -> Debugger {
        let interactive = self.config.interactive;
        let enabled = self.filter.is_enabled(name);
        let colour = if interactive {
            self.colours.next(name)
        } else {
            None
        };
        let policy = ChannelPolicy {
            prefix_date: !interactive && !self.config.hide_date,
            suffix_elapsed: interactive,
        };

        tracing::debug!(
            channel = name,
            enabled,
            colour = ?colour.as_ref().map(|c| c.code()),
            "created debug channel"
        );

        Debugger::new(ChannelInstance::new(
            name,
            enabled,
            colour,
            policy,
            Arc::clone(&self.output),
        ))
    }
}

/// Process-wide context, configured from the environment on first use.
pub fn global() -> &'static DebugContext {
    static GLOBAL: OnceLock<DebugContext> = OnceLock::new();
    GLOBAL.get_or_init(DebugContext::from_env)
}

/// Create a channel on the process-wide context.
pub fn create_debug(name: &str) -> Debugger {
    global().create(name)
}
