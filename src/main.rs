use clap::Parser;
use std::process::ExitCode;

mod input;
mod openaiapi;
mod prompt;
mod ui;


#[derive(Parser)]
#[clap(name = "aicommand", version)]
/// Execute a shell command (or read piped input) and ask an OpenAI model to explain the output
struct Cli {
	/// The command line to execute (standard input is read when omitted)
	args: Vec<String>,
	#[clap(short, long, value_enum, default_value_t = prompt::Language::detect())]
	/// Language for the explanation
	language: prompt::Language,
	#[clap(short, long, default_value = "gpt-3.5-turbo")]
	/// The model to be used for the chat completion
	model: String,
	#[clap(short, long, default_value = "")]
	/// Custom prompt filled into the context slot of the analysis template
	prompt: String,
}

#[tokio::main]
async fn main() -> ExitCode {
	let args = Cli::parse();
	match run(args).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			ui::error(&err.to_string());
			ExitCode::FAILURE
		},
	}
}

async fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
	let captured = input::acquire(&args.args).await?;

	let full_prompt = prompt::compose(args.language, &captured, &args.prompt);

	// Resolve the credential before anything touches the network
	let ctx = openaiapi::ClientContext::from_env(&args.model)?;

	ui::data_received(&captured.body);

	let spinner = ui::Spinner::start();
	let reply = ctx.complete(&full_prompt).await;
	spinner.stop();

	let reply = reply?;
	ui::response_received();
	println!("{}", reply);
	Ok(())
}
