use clap::ValueEnum;
use std::collections::HashMap;
use std::env;

use crate::input::CapturedOutput;

pub const NO_CONTEXT_SENTINEL: &str = "No additional context provided.";

const TEMPLATE_EN: &str = "Executed command or input source: {% command %}\n\
Output:\n\
{% output %}\n\
Context: {% context %}\n\
What does this output indicate? Are there any issues or further actions required?";

const TEMPLATE_JA: &str = "実行されたコマンドまたは入力ソース: {% command %}\n\
出力:\n\
{% output %}\n\
コンテキスト: {% context %}\n\
この出力が示すものは何ですか？ 問題はありますか、またはさらなるアクションが必要ですか？";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Language {
	En,
	Ja,
}

impl Language {
	/// Default taken from the LANG environment variable prefix, English for
	/// anything else.
	pub fn detect() -> Self {
		match env::var("LANG") {
			Ok(lang) if lang.starts_with("ja") => Language::Ja,
			_ => Language::En,
		}
	}

	fn template(self) -> &'static str {
		match self {
			Language::En => TEMPLATE_EN,
			Language::Ja => TEMPLATE_JA,
		}
	}
}

/// Fills the language template. The custom prompt, when non-empty, replaces
/// the "no additional context" sentinel in the context slot; the analysis
/// template itself is always kept.
pub fn compose(language: Language, captured: &CapturedOutput, custom_prompt: &str) -> String {
	let context = if custom_prompt.is_empty() { NO_CONTEXT_SENTINEL } else { custom_prompt };
	let mut processor = TemplateProcessor::new();
	processor.add_replacement("command".to_string(), captured.label.clone());
	processor.add_replacement("output".to_string(), captured.body.clone());
	processor.add_replacement("context".to_string(), context.to_string());
	processor.process_template(language.template())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
	Normal,
	PossibleOpen,
	InKey,
	PossibleClose,
}

pub struct TemplateProcessor {
	replacements: HashMap<String, String>,
}

impl TemplateProcessor {
	pub fn new() -> Self {
		Self {
			replacements: HashMap::new(),
		}
	}

	pub fn add_replacement(&mut self, key: String, value: String) {
		self.replacements.insert(key, value);
	}

	pub fn process_template(&self, template: &str) -> String {
		let mut output = String::new();
		let mut state = State::Normal;
		let mut current_key = String::new();

		for ch in template.chars() {
			match state {
				State::Normal => {
					if ch == '{' {
						state = State::PossibleOpen;
					} else {
						output.push(ch);
					}
				}
				State::PossibleOpen => {
					if ch == '%' {
						state = State::InKey;
						current_key.clear();
					} else {
						output.push('{');
						output.push(ch);
						state = State::Normal;
					}
				}
				State::InKey => {
					if ch == '%' {
						state = State::PossibleClose;
					} else {
						current_key.push(ch);
					}
				}
				State::PossibleClose => {
					if ch == '}' {
						// Found complete tag: {% key %}
						let key = current_key.trim();
						if let Some(replacement) = self.replacements.get(key) {
							output.push_str(replacement);
						} else {
							// Key not found, output original tag
							output.push_str("{%");
							output.push_str(key);
							output.push_str("%}");
						}
						state = State::Normal;
					} else {
						// Not a closing brace, so the '%' was part of the key
						current_key.push('%');
						current_key.push(ch);
						state = State::InKey;
					}
				}
			}
		}

		match state {
			State::PossibleOpen => {
				output.push('{');
			}
			State::InKey => {
				output.push_str("{%");
				output.push_str(&current_key);
			}
			State::PossibleClose => {
				output.push_str("{%");
				output.push_str(&current_key);
				output.push('%');
			}
			State::Normal => {}
		}

		output
	}
}
