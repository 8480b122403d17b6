//! Line-oriented playground over the page widgets.
//!
//! Each input line is one command; the reply is printed by the caller.

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};

use crate::page::{Counter, DynamicList, Palette, Toggle};

pub const HELP: &str = "\
Commands:
  inc | dec | reset | random     change the counter
  add <text> | remove <n>        edit the list
  list | clear                   show or empty the list
  toggle                         show or hide the content block
  color                          pick a new background
  help | quit";

/// A parsed playground command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
    Reset,
    Random,
    Add(String),
    Remove(u64),
    List,
    Clear,
    Toggle,
    Color,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "inc" | "+" => Command::Increment,
            "dec" | "-" => Command::Decrement,
            "reset" => Command::Reset,
            "random" => Command::Random,
            "add" => Command::Add(rest.to_string()),
            "remove" | "rm" => {
                let id = rest
                    .parse()
                    .with_context(|| format!("'{rest}' is not a list item number"))?;
                Command::Remove(id)
            }
            "list" | "ls" => Command::List,
            "clear" => Command::Clear,
            "toggle" => Command::Toggle,
            "color" | "colour" => Command::Color,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{other}', try 'help'"),
        };
        Ok(command)
    }
}

/// Widget state for one playground session
pub struct Playground {
    counter: Counter,
    list: DynamicList,
    toggle: Toggle,
    palette: Palette,
    rng: StdRng,
}

impl Playground {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seeded playground for reproducible sessions
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            counter: Counter::new(),
            list: DynamicList::new(),
            toggle: Toggle::new(),
            palette: Palette::new(),
            rng,
        }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn list(&self) -> &DynamicList {
        &self.list
    }

    /// Apply one command and describe the result. `Quit` yields `None`.
    pub fn apply(&mut self, command: Command) -> Result<Option<String>> {
        let reply = match command {
            Command::Increment => {
                self.counter.increment();
                self.counter_line()
            }
            Command::Decrement => {
                self.counter.decrement();
                self.counter_line()
            }
            Command::Reset => {
                self.counter.reset();
                self.counter_line()
            }
            Command::Random => {
                self.counter.randomize(&mut self.rng);
                self.counter_line()
            }
            Command::Add(text) => self.list.add(&text)?.label(),
            Command::Remove(id) => format!("Removed {}", self.list.remove(id)?.label()),
            Command::List => self.list_lines(),
            Command::Clear => {
                self.list.clear();
                "List cleared".to_string()
            }
            Command::Toggle => {
                if self.toggle.toggle() {
                    "Content shown".to_string()
                } else {
                    "Content hidden".to_string()
                }
            }
            Command::Color => format!("Background: {}", self.palette.pick(&mut self.rng)),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(reply))
    }

    /// Read commands from `input` until EOF or `quit`, writing replies and
    /// errors to `output`. Bad commands do not end the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{HELP}")?;
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            let reply = Command::parse(&line).and_then(|command| self.apply(command));
            match reply {
                Ok(Some(text)) => writeln!(output, "{text}")?,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "playground command rejected");
                    writeln!(output, "⚠️ {e}")?;
                }
            }
        }
        Ok(())
    }

    fn counter_line(&self) -> String {
        format!(
            "Counter: {} ({})",
            self.counter.value(),
            self.counter.tone().color()
        )
    }

    fn list_lines(&self) -> String {
        if self.list.is_empty() {
            return "List is empty".to_string();
        }
        self.list
            .items()
            .iter()
            .map(|item| item.label())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}
