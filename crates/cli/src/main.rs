//! Harbor command line.
//!
//! Builds a container cluster from a TOML definition, prepares it against an
//! application package on disk and prints the resulting config snapshots as
//! JSON.

mod definition;
mod distribution;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use harbor_cluster::ConsumerKind;
use tracing::info;

use crate::definition::ClusterDefinition;
use crate::distribution::{DiskApplication, DiskFileDistribution};

/// Harbor command line arguments.
#[derive(Parser, Debug)]
#[command(name = "harbor")]
#[command(about = "Generate container cluster config snapshots")]
struct Args {
	/// Cluster definition file
	#[arg(value_name = "FILE")]
	definition: PathBuf,

	/// Application package directory (defaults to the definition's directory)
	#[arg(short, long, value_name = "DIR")]
	app_dir: Option<PathBuf>,

	/// Print only the snapshot for this consumer
	#[arg(short, long, value_name = "NAME")]
	consumer: Option<ConsumerKind>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let output = run(&args)?;
	println!("{output}");
	Ok(())
}

fn run(args: &Args) -> anyhow::Result<String> {
	let definition = ClusterDefinition::load(&args.definition)?;
	let app_dir = args.app_dir.clone().unwrap_or_else(|| {
		args.definition
			.parent()
			.filter(|parent| !parent.as_os_str().is_empty())
			.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
	});
	info!(definition = %args.definition.display(), app_dir = %app_dir.display(), "building cluster");

	let application = DiskApplication::new(&app_dir, definition.application.clone());
	let cluster = definition.into_cluster()?;
	let cluster = cluster
		.prepare(&application, &DiskFileDistribution::new(&app_dir))
		.context("failed to prepare cluster")?;

	let json = match args.consumer {
		Some(kind) => serde_json::to_string_pretty(&cluster.fill_config(kind)),
		None => serde_json::to_string_pretty(&cluster.snapshot_all()),
	};
	Ok(json?)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	if let Ok(filter) = EnvFilter::try_from_env("HARBOR_LOG") {
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.init();
		return;
	}

	tracing_subscriber::fmt()
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.init();
}
