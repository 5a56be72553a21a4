use eyre::bail;
use tracing::Level;
use viewbind_bind::Builder;

fn main() -> eyre::Result<()> {
	viewbind_core::init(Level::WARN);

	let builder = Builder::from_cargo_env()?;
	builder.emit_cargo_directives();

	let report = builder.run()?;
	if !report.is_complete() {
		for failure in &report.failures {
			println!("cargo:warning={failure}");
		}
		bail!("{} of {} binders failed", report.failures.len(), report.groups);
	}
	Ok(())
}
