//! Interactive session.
//!
//! One session is one browser-like visit: income schedules start blank and
//! reach the store only on `save`, deduction edits are stored immediately,
//! and the summary views re-read the store whenever they are focused.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use itr_core::forms::{FormError, IncomeForms, Schedule};
use itr_core::{KeyValueStore, StoreError, TaxRegime};
use thiserror::Error;

use crate::logging::{self, LogError};
use crate::state::SummaryState;
use crate::utils::{format_inr, parse_line_number};
use crate::views::{ComparisonView, DeductionsView, TotalIncomeView, render_schedule};

pub const HELP: &str = "\
Commands:
  set <schedule> <line> <field> <value>   edit one field of one line
  set deductions <section> <value>        edit a deduction (saved at once)
  label <schedule> <line> <text>          describe a line
  add <schedule>                          append a blank line
  remove <schedule> <line>                delete a line
  save <schedule>                         store the schedule total
  show <schedule>                         list lines and the unsaved total
  fields <schedule>                       list field names
  compare | focus                         re-read totals, compare regimes
  total [old|new]                         total income computation
  sections                                deduction sections and limits
  log <level>                             change the log filter
  logfile <path>|off                      append logs to a file, or stop
  help                                    this text
  quit                                    leave the session

Schedules: salary, house-property, business-profession, capital-gains,
other-sources, deductions. Lines are numbered from 1.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'; type `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown schedule '{0}'")]
    UnknownSchedule(String),

    #[error("'{0}' is not a line number (lines start at 1)")]
    InvalidLine(String),

    #[error("unknown regime '{0}'; expected old or new")]
    UnknownRegime(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set {
        schedule: Schedule,
        index: usize,
        field: String,
        value: String,
    },
    Label {
        schedule: Schedule,
        index: usize,
        label: String,
    },
    Add(Schedule),
    Remove {
        schedule: Schedule,
        index: usize,
    },
    Save(Schedule),
    Show(Schedule),
    Fields(Schedule),
    Compare,
    Total(Option<TaxRegime>),
    Sections,
    Log(String),
    /// `None` detaches the log file.
    LogFile(Option<PathBuf>),
    Help,
    Quit,
}

fn schedule_arg(arg: Option<&str>, usage: &'static str) -> Result<Schedule, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    Schedule::parse(arg).ok_or_else(|| CommandError::UnknownSchedule(arg.to_string()))
}

fn line_arg(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    parse_line_number(arg).ok_or_else(|| CommandError::InvalidLine(arg.to_string()))
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let rest = |words: std::str::SplitWhitespace<'_>| words.collect::<Vec<_>>().join(" ");

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                const USAGE: &str = "set <schedule> <line> <field> <value>";
                let schedule = schedule_arg(words.next(), USAGE)?;
                let index = match schedule {
                    Schedule::Deductions => 0,
                    _ => line_arg(words.next(), USAGE)?,
                };
                let field = words.next().ok_or(CommandError::Usage(USAGE))?.to_string();
                Command::Set {
                    schedule,
                    index,
                    field,
                    value: rest(words),
                }
            }
            "label" => {
                const USAGE: &str = "label <schedule> <line> <text>";
                let schedule = schedule_arg(words.next(), USAGE)?;
                let index = line_arg(words.next(), USAGE)?;
                Command::Label {
                    schedule,
                    index,
                    label: rest(words),
                }
            }
            "add" => Command::Add(schedule_arg(words.next(), "add <schedule>")?),
            "remove" => {
                const USAGE: &str = "remove <schedule> <line>";
                let schedule = schedule_arg(words.next(), USAGE)?;
                let index = line_arg(words.next(), USAGE)?;
                Command::Remove { schedule, index }
            }
            "save" => Command::Save(schedule_arg(words.next(), "save <schedule>")?),
            "show" => Command::Show(schedule_arg(words.next(), "show <schedule>")?),
            "fields" => Command::Fields(schedule_arg(words.next(), "fields <schedule>")?),
            "compare" | "focus" => Command::Compare,
            "total" => match words.next() {
                None => Command::Total(None),
                Some(r) => Command::Total(Some(
                    TaxRegime::parse(r).ok_or_else(|| CommandError::UnknownRegime(r.to_string()))?,
                )),
            },
            "sections" => Command::Sections,
            "log" => Command::Log(
                words
                    .next()
                    .ok_or(CommandError::Usage("log <level>"))?
                    .to_string(),
            ),
            "logfile" => match rest(words).as_str() {
                "" => return Err(CommandError::Usage("logfile <path>|off")),
                "off" => Command::LogFile(None),
                path => Command::LogFile(Some(PathBuf::from(path))),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Logging(#[from] LogError),
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Session {
    forms: IncomeForms,
    summary: SummaryState,
}

impl Session {
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        default_regime: TaxRegime,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            forms: IncomeForms::open(store).await?,
            summary: SummaryState::new(default_regime),
        })
    }

    pub fn forms(&self) -> &IncomeForms {
        &self.forms
    }

    pub fn summary(&self) -> &SummaryState {
        &self.summary
    }

    pub async fn execute(
        &mut self,
        command: Command,
    ) -> Result<Flow, SessionError> {
        let text = match command {
            Command::Set {
                schedule,
                index,
                field,
                value,
            } => {
                let amount = self
                    .forms
                    .set_line_item(schedule, index, &field, &value)
                    .await?;
                match schedule {
                    Schedule::Deductions => {
                        format!("Saved. Deductions total: {}", format_inr(amount))
                    }
                    _ => format!(
                        "Line {}: {}. {} total: {} (unsaved)",
                        index + 1,
                        format_inr(amount),
                        schedule,
                        format_inr(self.forms.total(schedule))
                    ),
                }
            }
            Command::Label {
                schedule,
                index,
                label,
            } => {
                self.forms.set_label(schedule, index, &label)?;
                format!("Line {} labelled.", index + 1)
            }
            Command::Add(schedule) => {
                let index = self.forms.add_line_item(schedule)?;
                format!("Added line {}.", index + 1)
            }
            Command::Remove { schedule, index } => {
                if self.forms.remove_line_item(schedule, index)? {
                    format!(
                        "Removed line {}. {} total: {} (unsaved)",
                        index + 1,
                        schedule,
                        format_inr(self.forms.total(schedule))
                    )
                } else {
                    format!("{} has no line {}.", schedule, index + 1)
                }
            }
            Command::Save(schedule) => {
                let total = self.forms.save(schedule).await?;
                format!("Saved {} total: {}", schedule, format_inr(total))
            }
            Command::Show(schedule) => render_schedule(&self.forms, schedule),
            Command::Fields(schedule) => IncomeForms::field_names(schedule).join(", "),
            Command::Compare => {
                let summary = self.summary.focus(self.forms.store().as_ref()).await?;
                ComparisonView::new(&summary.comparison).to_string()
            }
            Command::Total(regime) => {
                let regime = regime.unwrap_or(self.summary.default_regime);
                let summary = self.summary.focus(self.forms.store().as_ref()).await?;
                TotalIncomeView {
                    snapshot: &summary.snapshot,
                    result: summary.comparison.result_for(regime),
                }
                .to_string()
            }
            Command::Sections => DeductionsView::new(&self.forms.deductions).to_string(),
            Command::Log(level) => {
                logging::set_log_level(&level)?;
                format!("Log filter set to '{}'.", level)
            }
            Command::LogFile(Some(path)) => {
                logging::enable_file_logging(&path)?;
                format!("Logging to '{}'.", path.display())
            }
            Command::LogFile(None) => {
                logging::disable_file_logging();
                "File logging off.".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
        };
        Ok(Flow::Continue(text))
    }

    /// Reads commands from `input` until `quit` or end of input. Command
    /// errors are reported and the session carries on.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
        prompt: bool,
    ) -> std::io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(output, "itr> ")?;
                output.flush()?;
            }
            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "error: {}", e)?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue(text)) => writeln!(output, "{}", text)?,
                Ok(Flow::Quit) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "command failed");
                    writeln!(output, "error: {}", e)?;
                }
            }
        }
        Ok(())
    }
}
