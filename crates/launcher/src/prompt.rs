//! Interactive intro: board, connection, experiment, duration, subject
//!
//! Menus are numbered from zero and answered with the index. Input that is
//! not an integer or is out of range ends the run with an error; there is no
//! retry loop.

use std::io::{BufRead, Write};

use tracing::debug;

use eeg_types::{BoardKind, BoardSelection, ConnectionMethod, ExperimentKind};

use crate::error::{LauncherError, Result};
use crate::session::SessionRequest;

const BOARD_PROMPT: &str = "Enter Board Selection:";
const CONNECTION_PROMPT: &str = "Enter connection method:";
const EXPERIMENT_PROMPT: &str = "Enter Experiment Selection:";
const DURATION_PROMPT: &str = "Enter duration:";
const SUBJECT_PROMPT: &str = "Enter subject name/ID:";

/// Longest recording the launcher accepts, in seconds.
pub const MAX_DURATION_SECS: u64 = experiments::MAX_DURATION.as_secs();

/// Answers known before the prompt starts; each one skips its question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPreset {
    pub board: Option<BoardSelection>,
    pub experiment: Option<ExperimentKind>,
    pub duration_secs: Option<u64>,
    pub subject: Option<String>,
}

pub struct IntroPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IntroPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask every question the preset leaves open, in order.
    pub fn run(&mut self, preset: &SessionPreset) -> Result<SessionRequest> {
        let board = match preset.board {
            Some(board) => {
                debug!("Board preset to {}", board);
                board
            }
            None => self.ask_board()?,
        };

        let experiment = match preset.experiment {
            Some(experiment) => experiment,
            None => self.ask_experiment()?,
        };

        let duration_secs = match preset.duration_secs {
            Some(secs) => check_duration(i64::try_from(secs).unwrap_or(i64::MAX))?,
            None => self.ask_duration()?,
        };

        let subject = match &preset.subject {
            Some(subject) => subject.trim().to_string(),
            None => self.ask_subject()?,
        };

        Ok(SessionRequest {
            board,
            experiment,
            duration_secs,
            subject,
        })
    }

    fn ask_board(&mut self) -> Result<BoardSelection> {
        writeln!(self.output, "Welcome to the EEG session launcher.")?;
        writeln!(
            self.output,
            "Please enter the integer value corresponding to your EEG device:"
        )?;
        for (idx, board) in BoardKind::ALL.iter().enumerate() {
            writeln!(self.output, "[{}] {}", idx, board.display_name())?;
        }
        writeln!(self.output)?;

        let kind = self.read_choice(BOARD_PROMPT, "board", BoardKind::ALL.len(), BoardKind::from_index)?;
        writeln!(self.output, "Selected board {}\n", kind.display_name())?;

        // Only OpenBCI boards can use the WiFi shield
        if !kind.is_openbci() {
            return Ok(BoardSelection::new(kind));
        }

        writeln!(self.output, "Please select your connection method:")?;
        for (idx, method) in ConnectionMethod::ALL.iter().enumerate() {
            writeln!(self.output, "[{}] {}", idx, method.label())?;
        }
        writeln!(self.output)?;

        let connection = self.read_choice(
            CONNECTION_PROMPT,
            "connection",
            ConnectionMethod::ALL.len(),
            ConnectionMethod::from_index,
        )?;
        Ok(BoardSelection::with_connection(kind, connection))
    }

    fn ask_experiment(&mut self) -> Result<ExperimentKind> {
        writeln!(self.output, "Please select which experiment you would like to run:")?;
        for (idx, experiment) in ExperimentKind::ALL.iter().enumerate() {
            writeln!(self.output, "[{}] {}", idx, experiment.menu_label())?;
        }
        writeln!(self.output)?;

        let experiment = self.read_choice(
            EXPERIMENT_PROMPT,
            "experiment",
            ExperimentKind::ALL.len(),
            ExperimentKind::from_index,
        )?;
        writeln!(self.output, "Selected experiment {}\n", experiment.name())?;
        Ok(experiment)
    }

    fn ask_duration(&mut self) -> Result<u64> {
        writeln!(self.output, "Now, enter the duration of the recording (in seconds).\n")?;
        let secs = self.read_integer(DURATION_PROMPT)?;
        check_duration(secs)
    }

    fn ask_subject(&mut self) -> Result<String> {
        writeln!(
            self.output,
            "Finally, enter the name/ID of the subject you are recording data from.\n"
        )?;
        self.read_line(SUBJECT_PROMPT)
    }

    /// Read a menu index and map it to its entry.
    fn read_choice<T>(
        &mut self,
        prompt: &str,
        menu: &'static str,
        options: usize,
        lookup: fn(usize) -> Option<T>,
    ) -> Result<T> {
        let value = self.read_integer(prompt)?;
        usize::try_from(value)
            .ok()
            .and_then(lookup)
            .ok_or(LauncherError::InvalidSelection {
                menu,
                index: value,
                max: options - 1,
            })
    }

    fn read_integer(&mut self, prompt: &str) -> Result<i64> {
        let answer = self.read_line(prompt)?;
        answer.parse().map_err(|_| LauncherError::NotAnInteger {
            prompt: prompt.to_string(),
            input: answer,
        })
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(LauncherError::UnexpectedEof(prompt.to_string()));
        }
        Ok(buffer.trim().to_string())
    }
}

fn check_duration(secs: i64) -> Result<u64> {
    match u64::try_from(secs) {
        Ok(secs) if (1..=MAX_DURATION_SECS).contains(&secs) => Ok(secs),
        _ => Err(LauncherError::InvalidDuration(secs)),
    }
}
