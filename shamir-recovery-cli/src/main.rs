use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;
use shamir_recovery::{BasisPolicy, ReconstructionResult, Reconstructor, TestCase};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Recover shared secrets from test case files and report shares that do not fit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
	/// Test case documents, `{ "keys": { "n": .., "k": .. }, "1": { "base": .., "value": .. }, .. }`
	#[arg(default_values = ["testcase1.json", "testcase2.json", "testcase3.json"])]
	files: Vec<PathBuf>,

	/// How to choose the interpolation basis: fixed, fallback or majority
	#[arg(long, default_value_t = BasisPolicy::Fixed)]
	policy: BasisPolicy,

	/// Print one JSON document per test case instead of text
	#[arg(long)]
	json: bool,
}

fn load(path: &Path) -> Result<TestCase> {
	let raw = fs_err::read_to_string(path)?;
	let case = serde_json::from_str(&raw).wrap_err_with(|| format!("Malformed test case {}", path.display()))?;
	Ok(case)
}

/// Reconstruct all loaded cases in one parallel batch, keeping load failures in place.
fn reconstruct_all(reconstructor: &Reconstructor, loaded: Vec<Result<TestCase>>) -> Vec<Result<ReconstructionResult>> {
	let cases = loaded.iter().filter_map(|case| case.as_ref().ok()).cloned().collect::<Vec<_>>();
	let mut results = reconstructor.reconstruct_batch(&cases).into_iter();
	loaded
		.into_iter()
		.map(|case| match case {
			Ok(_) => results.next().expect("one result per loaded case. qed").map_err(Into::into),
			Err(err) => Err(err),
		})
		.collect()
}

fn print_text(number: usize, path: &Path, outcome: &Result<ReconstructionResult>) {
	match outcome {
		Ok(result) => {
			println!("Secret for test case {} ({}): {}", number, path.display(), result.secret);
			if result.wrong_shares.is_empty() {
				println!("No wrong shares found in test case {}.", number);
			} else {
				println!("Wrong shares in test case {}:", number);
				for share in &result.wrong_shares {
					println!("Share with x = {} and y = {} is wrong", share.x, share.y);
				}
			}
		}
		Err(err) => println!("Test case {} ({}) failed: {:#}", number, path.display(), err),
	}
}

fn print_json(path: &Path, outcome: &Result<ReconstructionResult>) -> Result<()> {
	let doc = match outcome {
		Ok(result) => {
			let mut doc = serde_json::to_value(result)?;
			doc["file"] = path.display().to_string().into();
			doc
		}
		Err(err) => json!({ "file": path.display().to_string(), "error": format!("{err:#}") }),
	};
	println!("{}", serde_json::to_string(&doc)?);
	Ok(())
}

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let args = Args::parse();
	tracing::info!(files = args.files.len(), policy = %args.policy, "Reconstructing test cases");

	let reconstructor = Reconstructor::new(args.policy);
	let loaded = args.files.iter().map(|path| load(path)).collect::<Vec<_>>();
	let outcomes = reconstruct_all(&reconstructor, loaded);

	let mut failed = 0;
	for (number, (path, outcome)) in args.files.iter().zip(&outcomes).enumerate() {
		if let Err(err) = outcome {
			tracing::debug!(file = %path.display(), "Test case failed");
			failed += 1;
		}
		if args.json {
			print_json(path, outcome)?;
		} else {
			print_text(number + 1, path, outcome);
		}
	}

	if failed > 0 {
		return Err(eyre!("{} of {} test cases failed", failed, outcomes.len()));
	}
	Ok(())
}
