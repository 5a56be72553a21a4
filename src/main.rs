use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use eyre::Context;
use tracing::{error, Level};
use viewbind_bind::Builder;
use viewbind_reader::{extract, DuplicatePolicy, SourceScanner, DEFAULT_ATTRIBUTE};

/// Generates view binders from `#[bind_view(..)]` fields.
#[derive(Parser)]
#[command(name = "viewbind", version)]
struct Args {
	/// More output. Repeat for more.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print every binding found under a source directory.
	Scan {
		#[arg(long)]
		src: PathBuf,
		#[arg(long, default_value = DEFAULT_ATTRIBUTE)]
		attribute: String,
		#[arg(long)]
		allow_duplicates: bool,
	},
	/// Write one binder per owner, and the registry manifest.
	Generate {
		#[arg(long)]
		src: PathBuf,
		#[arg(long)]
		out: PathBuf,
		/// Attribute to scan for. `#[derive(BindViews)]` only makes `bind_view` legal.
		#[arg(long, default_value = DEFAULT_ATTRIBUTE)]
		attribute: String,
		/// Path the generated code uses to reach the runtime crate.
		#[arg(long, default_value = "::viewbind_runtime")]
		runtime_path: String,
		#[arg(long)]
		allow_duplicates: bool,
		#[arg(long)]
		no_manifest: bool,
	},
}

fn duplicates(allow: bool) -> DuplicatePolicy {
	if allow {
		DuplicatePolicy::Allow
	} else {
		DuplicatePolicy::Reject
	}
}

fn main() -> eyre::Result<ExitCode> {
	let args = Args::parse();
	viewbind_core::init(match args.verbose {
		0 => Level::INFO,
		1 => Level::DEBUG,
		_ => Level::TRACE,
	});

	match args.command {
		Command::Scan {
			src,
			attribute,
			allow_duplicates,
		} => {
			let members = SourceScanner::new(attribute)
				.scan_dir(&src)
				.wrap_err_with(|| format!("Scanning {}", src.display()))?;
			for record in extract(members, duplicates(allow_duplicates))? {
				println!(
					"{}.{} = {}",
					record.owner_qualified_name, record.member_name, record.identifier
				);
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Generate {
			src,
			out,
			attribute,
			runtime_path,
			allow_duplicates,
			no_manifest,
		} => {
			let report = Builder::new(src, out)
				.attribute(attribute)
				.runtime_path(runtime_path)
				.duplicates(duplicates(allow_duplicates))
				.manifest(!no_manifest)
				.run()?;

			for path in &report.written {
				println!("{}", path.display());
			}
			if let Some(manifest) = &report.manifest {
				println!("{}", manifest.display());
			}

			if report.is_complete() {
				Ok(ExitCode::SUCCESS)
			} else {
				error!("{} of {} binders failed", report.failures.len(), report.groups);
				Ok(ExitCode::FAILURE)
			}
		}
	}
}
