//! Line-based terminal input and output
//!
//! Every prompt reads one line. End of input (Ctrl-D) or `q` cancels the
//! current decision; invalid answers are retried a bounded number of times
//! before the decision is treated as cancelled.

use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Stdin, Stdout, Write};

/// Invalid answers tolerated before a prompt gives up
pub const MAX_ATTEMPTS: usize = 5;

pub struct Console<R, W> {
    input: R,
    output: W,
    /// Clear the screen and style headings
    interactive: bool,
}

impl Console<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        let interactive = stdin.is_terminal() && io::stdout().is_terminal();
        Console::new(stdin.lock(), io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Console {
            input,
            output,
            interactive,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print several lines
    pub fn say_all<S: Display>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.interactive {
            writeln!(self.output, "{}", format!("--- {} ---", text).bold())
        } else {
            writeln!(self.output, "--- {} ---", text)
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.interactive {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Read one trimmed line, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for free text. `None` when cancelled.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.read_line()
    }

    /// Numbered menu returning the chosen option in `[1, options.len()]`
    ///
    /// `None` when the player cancels, runs out of input or keeps answering
    /// with something that is not an option.
    pub fn menu<S: AsRef<str>>(&mut self, options: &[S]) -> io::Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, option.as_ref())?;
        }

        for _ in 0..MAX_ATTEMPTS {
            let Some(answer) = self.ask("Choose an option: ")? else {
                self.say("Cancelled menu!")?;
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                self.say("Cancelled menu!")?;
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice)),
                Ok(_) => self.say("Invalid option selection. Please try again.")?,
                Err(_) => self.say(
                    "Invalid input. Please use only the number representing the option you wish to choose.",
                )?,
            }
        }
        tracing::debug!("Menu abandoned after {} invalid answers", MAX_ATTEMPTS);
        self.say("Too many invalid answers, cancelling.")?;
        Ok(None)
    }

    /// Menu over `items`, labelling each with `label`
    pub fn choose<'t, T>(
        &mut self,
        items: &'t [T],
        label: impl Fn(&T) -> String,
    ) -> io::Result<Option<&'t T>> {
        let labels: Vec<String> = items.iter().map(label).collect();
        Ok(self.menu(&labels)?.map(|choice| &items[choice - 1]))
    }

    /// Yes if the answer starts with `y`; anything else, including end of input, is no
    pub fn yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.map_or(false, |a| a.to_ascii_uppercase().starts_with('Y')))
    }
}
