//! Per-call diagnostics.

use std::fmt;

use crate::Error;

/// What happened to a dispatched call.
#[derive(Debug, Clone, Copy)]
pub enum CallOutcome<'a> {
	Returned,
	Failed(&'a Error),
}

/// One dispatched call as seen by a [`CallSink`].
#[derive(Debug, Clone, Copy)]
pub struct CallRecord<'a> {
	pub command: &'static str,
	/// Alias that was called, `None` when no alias was bound.
	pub symbol: Option<&'static str>,
	pub args: &'a dyn fmt::Debug,
	pub outcome: CallOutcome<'a>,
}

/// Receives every dispatched call when call tracing is enabled.
pub trait CallSink {
	fn record(&self, call: &CallRecord<'_>);
}

/// Emits calls as `trace` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl CallSink for TracingSink {
	fn record(&self, call: &CallRecord<'_>) {
		match call.outcome {
			CallOutcome::Returned => {
				tracing::trace!(command = call.command, symbol = call.symbol, args = ?call.args, "call");
			}
			CallOutcome::Failed(error) => {
				tracing::trace!(command = call.command, symbol = call.symbol, args = ?call.args, %error, "call failed");
			}
		}
	}
}

/// Discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CallSink for NullSink {
	fn record(&self, _: &CallRecord<'_>) {}
}

/// A sink plus the switch that decides whether it sees anything.
pub(crate) struct Tracer {
	enabled: bool,
	sink: Box<dyn CallSink>,
}

impl Tracer {
	pub(crate) fn new(enabled: bool) -> Self {
		Self {
			enabled,
			sink: Box::new(TracingSink),
		}
	}

	pub(crate) fn set_sink(&mut self, sink: Box<dyn CallSink>) {
		self.sink = sink;
	}

	pub(crate) fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	pub(crate) fn record<T>(
		&self,
		command: &'static str,
		symbol: Option<&'static str>,
		args: &dyn fmt::Debug,
		result: &Result<T, Error>,
	) {
		if !self.enabled {
			return;
		}
		let outcome = match result {
			Ok(_) => CallOutcome::Returned,
			Err(e) => CallOutcome::Failed(e),
		};
		self.sink.record(&CallRecord {
			command,
			symbol,
			args,
			outcome,
		});
	}
}
