use std::env;
use std::io::{self, Read};
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;

pub const PIPELINE_LABEL: &str = "Input from pipeline";

const FALLBACK_SHELL: &str = "/bin/sh";

#[derive(Debug, Error)]
pub enum InputError {
	#[error("Error reading from stdin: {0}")]
	Stdin(#[source] io::Error),
	#[error("Error executing command: {0}")]
	Spawn(#[source] io::Error),
	#[error("Command exited with {status}: {}", .stderr.trim_end())]
	CommandFailed { status: ExitStatus, stderr: String },
}

/// Text captured from either the pipeline or an executed command, together
/// with a label naming where it came from.
pub struct CapturedOutput {
	pub label: String,
	pub body: String,
}

pub async fn acquire(args: &[String]) -> Result<CapturedOutput, InputError> {
	if args.is_empty() {
		read_pipeline()
	} else {
		run_command(args).await
	}
}

fn read_pipeline() -> Result<CapturedOutput, InputError> {
	let mut buffer = Vec::new();
	io::stdin().read_to_end(&mut buffer).map_err(InputError::Stdin)?;
	Ok(CapturedOutput {
		label: PIPELINE_LABEL.to_string(),
		body: String::from_utf8_lossy(&buffer).into_owned(),
	})
}

/// Joins the arguments into one command line and hands it to the shell with
/// `-c`, so pipes and globs keep working. The operator is trusted with their
/// own shell; no escaping is applied.
pub async fn run_command(args: &[String]) -> Result<CapturedOutput, InputError> {
	let command_line = args.join(" ");
	let output = Command::new(resolve_shell())
		.arg("-c")
		.arg(&command_line)
		.output()
		.await
		.map_err(InputError::Spawn)?;
	if !output.status.success() {
		return Err(InputError::CommandFailed {
			status: output.status,
			stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
		});
	}
	Ok(CapturedOutput {
		label: command_line,
		body: String::from_utf8_lossy(&output.stdout).into_owned(),
	})
}

fn resolve_shell() -> String {
	match env::var("SHELL") {
		Ok(shell) if !shell.is_empty() => shell,
		_ => {
			eprintln!("Using {} as a fallback since the SHELL environment variable is not set.", FALLBACK_SHELL);
			FALLBACK_SHELL.to_string()
		},
	}
}
