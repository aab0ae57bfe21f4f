use std::io::{self, BufRead, Write};

use dialoguer::Input;
use log::debug;

use crate::config::YES_NO;
use crate::error::InputError;

// ---------------------------------------------------------------------------
// Console – where prompts go and answers come from
// ---------------------------------------------------------------------------

pub trait Console {
    /// Show `prompt` and read one line of input (without the newline).
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;

    /// Sink for everything that is not a prompt.
    fn out(&mut self) -> &mut dyn Write;
}

/// Line-oriented console over any reader/writer pair. Used when input is
/// piped, and by the tests with in-memory buffers.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// Interactive terminal console with line editing.
pub struct TerminalConsole {
    stdout: io::Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        // dialoguer appends its own ": " separator.
        let prompt = prompt.trim_end().trim_end_matches(':');
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }
}

// ---------------------------------------------------------------------------
// Validated prompts
// ---------------------------------------------------------------------------

/// Ask until the answer matches one of `options` (case-insensitively,
/// ignoring surrounding whitespace) and return the matching option.
/// Every rejected answer prints the accepted set and asks again.
pub fn choose(
    console: &mut dyn Console,
    prompt: &str,
    options: &[&'static str],
) -> Result<&'static str, InputError> {
    loop {
        let answer = console.read_line(prompt)?.trim().to_lowercase();
        if let Some(option) = options.iter().copied().find(|o| *o == answer) {
            return Ok(option);
        }
        debug!("rejected answer {answer:?} for prompt {prompt:?}");
        writeln!(
            console.out(),
            "Invalid input. Please choose from: {}",
            options.join(", ")
        )?;
    }
}

/// Ask a yes/no question.
pub fn confirm(console: &mut dyn Console, prompt: &str) -> Result<bool, InputError> {
    Ok(choose(console, prompt, &YES_NO)? == "yes")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> LineConsole<Cursor<Vec<u8>>, Vec<u8>> {
        LineConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(c: &LineConsole<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(c.output().clone()).unwrap()
    }

    #[test]
    fn accepts_case_insensitive_match() {
        let mut c = console("  Chicago \n");
        let picked = choose(&mut c, "City: ", &["chicago", "washington"]).unwrap();
        assert_eq!(picked, "chicago");
        assert_eq!(printed(&c), "City: ");
    }

    #[test]
    fn reprompts_until_valid() {
        let mut c = console("boston\n\nWASHINGTON\n");
        let picked = choose(&mut c, "City: ", &["chicago", "washington"]).unwrap();
        assert_eq!(picked, "washington");

        let out = printed(&c);
        assert_eq!(out.matches("City: ").count(), 3);
        assert_eq!(
            out.matches("Invalid input. Please choose from: chicago, washington")
                .count(),
            2
        );
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut c = console("nope\n");
        let err = choose(&mut c, "City: ", &["chicago"]).unwrap_err();
        assert!(matches!(err, InputError::Closed));
    }

    #[test]
    fn confirm_maps_yes_and_no() {
        let mut c = console("YES\nno\n");
        assert!(confirm(&mut c, "Again? ").unwrap());
        assert!(!confirm(&mut c, "Again? ").unwrap());
    }

    #[test]
    fn handles_windows_line_endings() {
        let mut c = console("no\r\n");
        assert!(!confirm(&mut c, "Again? ").unwrap());
    }
}
