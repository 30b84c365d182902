//! Opens an X display, binds the GLX table and prints what was found.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use glaze_binding::BindingReport;
use glaze_config::Config;
use glaze_gl::GlxDisplay;
use glaze_primitives::CapabilitySnapshot;
use serde::Serialize;
use tracing::info;

/// Probe command line arguments.
#[derive(Parser, Debug)]
#[command(name = "glaze-probe")]
#[command(about = "Report GLX capabilities and entry-point bindings")]
#[command(version)]
struct Args {
	/// Configuration file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// X display name, defaults to $DISPLAY
	#[arg(short, long, value_name = "NAME")]
	display: Option<String>,

	/// Print a JSON document instead of text
	#[arg(long)]
	json: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[derive(Serialize)]
struct Probe<'a> {
	display: Option<&'a str>,
	threaded: bool,
	snapshot: &'a CapabilitySnapshot,
	binding: &'a BindingReport,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let mut config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	config.apply_env()?;

	info!(display = args.display.as_deref().unwrap_or("$DISPLAY"), "opening display");
	let display = GlxDisplay::open(args.display.as_deref(), &config)?;

	let probe = Probe {
		display: args.display.as_deref(),
		threaded: display.connection().is_threaded(),
		snapshot: display.snapshot(),
		binding: display.report(),
	};

	let mut out = io::stdout().lock();
	if args.json {
		serde_json::to_writer_pretty(&mut out, &probe)?;
		writeln!(out)?;
	} else {
		write_text(&mut out, &probe)?;
	}
	Ok(())
}

fn write_text(out: &mut impl Write, probe: &Probe<'_>) -> io::Result<()> {
	let snapshot = probe.snapshot;
	writeln!(out, "display:    {}", probe.display.unwrap_or("$DISPLAY"))?;
	writeln!(out, "threaded:   {}", probe.threaded)?;
	match snapshot.profile() {
		Some(profile) => writeln!(out, "api:        {} {} ({profile})", snapshot.api(), snapshot.version())?,
		None => writeln!(out, "api:        {} {}", snapshot.api(), snapshot.version())?,
	}

	let extensions = snapshot.extensions().sorted();
	writeln!(out, "extensions: {}", extensions.len())?;
	for name in extensions {
		writeln!(out, "  {name}")?;
	}

	let binding = probe.binding;
	writeln!(out, "bound:      {}/{} eligible aliases", binding.bound, binding.eligible)?;
	for (command, symbol) in &binding.selected {
		writeln!(out, "  {command:<24} {symbol}")?;
	}
	if !binding.unbound.is_empty() {
		writeln!(out, "unbound:    {}", binding.unbound.len())?;
		for command in &binding.unbound {
			writeln!(out, "  {command}")?;
		}
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("glaze=trace,debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(true)
		.init();
}
