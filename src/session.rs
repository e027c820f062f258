//! Application state and the interactive session
//!
//! [`AppState`] holds the active mode, the picker instance, the weekly target
//! weekday and the last output.
//! A session drives it one command per line.

use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::Weekday;
use tracing::{debug, info, trace, warn};

use crate::clipboard::{copy_output, Clipboard, CopyTarget};
use crate::date::{parse_date_list, parse_weekday, CalendarDate, WEEKDAY_JP};
use crate::error::{Error, Result};
use crate::render::{render, RenderedOutput};
use crate::selection::{generate, ResultSet, Selection, SelectionMode};

/// Stand-in for the calendar widget: holds the dates picked so far
///
/// A picker is built for one mode and dropped when the mode changes.
#[derive(Debug)]
pub struct Picker {
    mode: SelectionMode,
    selected: Vec<CalendarDate>,
}

impl Picker {
    pub fn new(mode: SelectionMode) -> Self {
        trace!(%mode, "picker created");
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Dates in the order they were picked
    pub fn selected(&self) -> &[CalendarDate] {
        &self.selected
    }

    /// Add the dates from one pick
    ///
    /// A range or weekly picker that already holds a start/end pair starts
    /// over. Within one pick every date is kept. Multiple pickers accumulate.
    pub fn pick(&mut self, dates: impl IntoIterator<Item = CalendarDate>) {
        let dates: Vec<CalendarDate> = dates.into_iter().collect();
        if dates.is_empty() {
            return;
        }
        if self.mode != SelectionMode::Multiple && self.selected.len() >= 2 {
            self.selected.clear();
        }
        self.selected.extend(dates);
    }

    /// Add dates from the `, `-delimited text form; nothing is added if any piece is invalid
    pub fn pick_text(&mut self, text: &str) -> Result<usize> {
        let dates = parse_date_list(text)?;
        let count = dates.len();
        self.pick(dates);
        Ok(count)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// What the picker currently hands to the formatter
    ///
    /// Weekly: a pair keeps its pick order, so a reversed pair is rejected
    /// later. More than two dates span from the earliest to the latest.
    pub fn selection(&self, weekday: Weekday) -> Result<Selection> {
        match self.mode {
            SelectionMode::Range => Ok(Selection::Range(self.selected.clone())),
            SelectionMode::Multiple => Ok(Selection::Multiple(self.selected.clone())),
            SelectionMode::Weekly => {
                let (start, end) = match self.selected.as_slice() {
                    [] => return Err(Error::EmptyInput),
                    [only] => (*only, *only),
                    [start, end] => (*start, *end),
                    many => {
                        let start = many.iter().min().ok_or(Error::EmptyInput)?;
                        let end = many.iter().max().ok_or(Error::EmptyInput)?;
                        (*start, *end)
                    }
                };
                Ok(Selection::Weekly { start, end, weekday })
            }
        }
    }
}

impl Drop for Picker {
    fn drop(&mut self) {
        trace!(mode = %self.mode, "picker disposed");
    }
}

/// Everything one page instance keeps between button presses
#[derive(Debug)]
pub struct AppState {
    picker: Picker,
    weekday: Weekday,
    results: Option<ResultSet>,
    output: RenderedOutput,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl AppState {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            picker: Picker::new(mode),
            weekday: Weekday::Mon,
            results: None,
            output: RenderedOutput::default(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.picker.mode()
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Last successful result set, if any
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Current output; blank after a clear or mode change
    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    /// Switch modes, replacing the picker and clearing results
    ///
    /// Returns `false` when `mode` is already active.
    pub fn change_mode(&mut self, mode: SelectionMode) -> bool {
        if self.mode() == mode {
            return false;
        }
        info!(from = %self.mode(), to = %mode, "changing mode");
        self.picker = Picker::new(mode);
        self.clear_results();
        true
    }

    pub fn pick(&mut self, text: &str) -> Result<usize> {
        self.picker.pick_text(text)
    }

    pub fn set_weekday(&mut self, text: &str) -> Result<Weekday> {
        self.weekday = parse_weekday(text)?;
        Ok(self.weekday)
    }

    /// Run the formatter on the current picker contents
    ///
    /// On failure the previous output is left in place.
    pub fn generate(&mut self) -> Result<&RenderedOutput> {
        let selection = self.picker.selection(self.weekday)?;
        let results = generate(&selection)?;
        self.output = render(&results);
        self.results = Some(results);
        Ok(&self.output)
    }

    pub fn clear_results(&mut self) {
        self.results = None;
        self.output = RenderedOutput::default();
    }

    /// Deselect every date in the picker; the output stays
    pub fn clear_selection(&mut self) {
        self.picker.clear();
    }

    /// Clear both the picker and the results
    pub fn clear_all(&mut self) {
        self.picker.clear();
        self.clear_results();
    }

    pub fn copy(&self, target: CopyTarget, clipboard: &mut dyn Clipboard) -> Result<&'static str> {
        copy_output(clipboard, &self.output, target)
    }
}

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(SelectionMode),
    Pick(String),
    Weekday(String),
    Generate,
    Copy(CopyTarget),
    Show,
    Deselect,
    Clear,
    Reset,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match (name.to_lowercase().as_str(), arg.is_empty()) {
            ("mode", false) => Command::Mode(arg.parse()?),
            ("pick", false) => Command::Pick(arg.to_string()),
            ("weekday", false) => Command::Weekday(arg.to_string()),
            ("copy", false) => Command::Copy(arg.parse()?),
            ("generate", true) => Command::Generate,
            ("show", true) => Command::Show,
            ("deselect", true) => Command::Deselect,
            ("clear", true) => Command::Clear,
            ("reset", true) => Command::Reset,
            ("help", true) => Command::Help,
            ("quit", true) | ("exit", true) => Command::Quit,
            _ => return Err(Error::UnknownCommand(line.to_string())),
        };
        Ok(command)
    }
}

const HELP: &str = "\
mode <range|multiple|weekly>    switch mode (clears results)
pick <YYYY/MM/DD[, ...]>        pick one or more dates
weekday <0-6|日..土|name>        target weekday for weekly mode
generate                        build the date list
copy <display|tokens|combined>  copy part of the output
show                            print the current output
deselect                        clear the picked dates, keep the output
clear                           clear the output
reset                           clear the picker and the output
quit                            leave the session";

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the state, writing anything user-visible to `out`
pub fn execute<W: Write>(
    state: &mut AppState,
    command: Command,
    out: &mut W,
    clipboard: &mut dyn Clipboard,
) -> Result<Flow> {
    debug!(?command, "executing");
    match command {
        Command::Mode(mode) => {
            state.change_mode(mode);
            writeln!(out, "mode: {}", state.mode())?;
        }
        Command::Pick(text) => {
            state.pick(&text)?;
            let picked: Vec<String> = state.picker().selected().iter().map(ToString::to_string).collect();
            writeln!(out, "selected: {}", picked.join(", "))?;
        }
        Command::Weekday(text) => {
            let weekday = state.set_weekday(&text)?;
            let index = weekday.num_days_from_sunday() as usize;
            writeln!(out, "weekday: {}", WEEKDAY_JP[index])?;
        }
        Command::Generate => {
            let text = state.generate()?.to_text();
            write!(out, "{}", text)?;
        }
        Command::Copy(target) => {
            let message = state.copy(target, clipboard)?;
            writeln!(out, "{}", message)?;
        }
        Command::Show => {
            write!(out, "{}", state.output().to_text())?;
        }
        Command::Deselect => state.clear_selection(),
        Command::Clear => state.clear_results(),
        Command::Reset => state.clear_all(),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Read commands until end of input or `quit`
///
/// Validation failures are written as `! message` and the session carries on.
/// Only IO errors end it early.
pub fn run_session<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    out: &mut W,
    clipboard: &mut dyn Clipboard,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let outcome = line
            .parse::<Command>()
            .and_then(|command| execute(state, command, out, clipboard));

        match outcome {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) if err.is_notice() => {
                warn!(%line, error = %err, "command rejected");
                writeln!(out, "! {}", err)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
