use crate::tty;
use std::io::{self, BufRead, Write};

/// Free text input.
pub struct TextPrompt {
    pub question: String,
    pub default: Option<String>,
}

/// A yes/no confirmation prompt.
pub struct YesNoPrompt {
    pub question: String,
    /// true = default yes [Y/n], false = default no [y/N]
    pub default: bool,
}

/// Select one option from a list.
pub struct SelectPrompt {
    pub question: String,
    pub options: Vec<SelectOption>,
    pub default_index: Option<usize>,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Data-driven interactive prompt engine.
/// Handles TTY detection and provides consistent prompting behavior.
pub struct PromptEngine {
    interactive: bool,
}

impl PromptEngine {
    /// Create engine with automatic TTY detection.
    pub fn new() -> Self {
        Self {
            interactive: tty::require_tty_for_interactive(),
        }
    }

    /// Create engine with explicit interactive mode.
    pub fn with_interactive(interactive: bool) -> Self {
        Self { interactive }
    }

    /// Force non-interactive mode (useful for --yes flags).
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Run a free-text prompt. Returns the default if non-interactive
    /// or if the user submits an empty line.
    pub fn text(&self, prompt: &TextPrompt) -> Option<String> {
        if !self.interactive {
            return prompt.default.clone();
        }

        match &prompt.default {
            Some(default) => eprint!("{} [{}]: ", prompt.question, default),
            None => eprint!("{}: ", prompt.question),
        }
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return prompt.default.clone();
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return prompt.default.clone();
        }

        Some(trimmed.to_string())
    }

    /// Run a yes/no prompt. Returns default if non-interactive.
    pub fn yes_no(&self, prompt: &YesNoPrompt) -> bool {
        if !self.interactive {
            return prompt.default;
        }

        let suffix = if prompt.default { "[Y/n]" } else { "[y/N]" };
        eprint!("{} {}: ", prompt.question, suffix);
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return prompt.default;
        }

        let trimmed = input.trim().to_lowercase();
        if trimmed.is_empty() {
            return prompt.default;
        }

        trimmed.starts_with('y')
    }

    /// Display a message to stderr (only in interactive mode).
    pub fn message(&self, msg: &str) {
        if self.interactive {
            eprintln!("{}", msg);
        }
    }

    /// Run a select prompt (choose one option).
    pub fn select(&self, prompt: &SelectPrompt) -> Option<String> {
        if !self.interactive {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        eprintln!("{}", prompt.question);
        for (i, opt) in prompt.options.iter().enumerate() {
            let marker = if Some(i) == prompt.default_index {
                "*"
            } else {
                " "
            };
            eprintln!("  {}[{}] {}", marker, i + 1, opt.label);
        }

        eprint!("Enter choice (1-{}): ", prompt.options.len());
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return prompt
                .default_index
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.value.clone());
        }

        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|n| prompt.options.get(n.saturating_sub(1)))
            .map(|o| o.value.clone())
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_text_returns_default() {
        let engine = PromptEngine::non_interactive();
        let with_default = TextPrompt {
            question: "Project name".to_string(),
            default: Some("demo".to_string()),
        };
        let without_default = TextPrompt {
            question: "Project name".to_string(),
            default: None,
        };

        assert_eq!(engine.text(&with_default), Some("demo".to_string()));
        assert_eq!(engine.text(&without_default), None);
    }

    #[test]
    fn non_interactive_yes_no_returns_default() {
        let engine = PromptEngine::non_interactive();
        assert!(engine.yes_no(&YesNoPrompt {
            question: "Continue?".to_string(),
            default: true,
        }));
        assert!(!engine.yes_no(&YesNoPrompt {
            question: "Continue?".to_string(),
            default: false,
        }));
    }

    #[test]
    fn non_interactive_select_returns_default_option() {
        let engine = PromptEngine::non_interactive();
        let prompt = SelectPrompt {
            question: "CI provider".to_string(),
            options: vec![
                SelectOption {
                    value: "travis".to_string(),
                    label: "Travis CI".to_string(),
                },
                SelectOption {
                    value: "github".to_string(),
                    label: "GitHub Actions".to_string(),
                },
            ],
            default_index: Some(1),
        };

        assert_eq!(engine.select(&prompt), Some("github".to_string()));
    }

    #[test]
    fn non_interactive_select_without_default_returns_none() {
        let engine = PromptEngine::non_interactive();
        let prompt = SelectPrompt {
            question: "CI provider".to_string(),
            options: vec![],
            default_index: None,
        };

        assert_eq!(engine.select(&prompt), None);
    }
}
