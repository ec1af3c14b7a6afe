//! Interactive console controller
//!
//! Reads choices line by line and re-prompts until they are valid. Generic
//! over the reader and writer so it can be driven from tests.

use std::io::{self, BufRead, Write};

use dd_core::{BattleController, CombatError, Entity, GameEvent, Mob, PlayerClass, Role};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::narrate::{LINE_BREAK, narrate};

/// Why a menu choice was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Invalid,
    InsufficientMana,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::Invalid => "Invalid input, please select again\n",
            Rejection::InsufficientMana => "Insufficient mana, please select again\n",
        }
    }
}

/// Parse a 1-based menu entry into a zero-based, affordable ability index.
pub fn parse_selection(line: &str, player: &PlayerClass) -> Result<usize, Rejection> {
    let index = line
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or(Rejection::Invalid)?;
    match player.validate_selection(index) {
        Ok(_) => Ok(index),
        Err(CombatError::InsufficientMana { .. }) => Err(Rejection::InsufficientMana),
        Err(_) => Err(Rejection::Invalid),
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
    /// Read failure that ended a battle, kept for the caller
    failure: Option<io::Error>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            failure: None,
        }
    }

    /// The input error that made the console abandon a battle, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Show every class's menu, then ask until a known class is named.
    pub fn choose_role(&mut self) -> io::Result<Option<Role>> {
        writeln!(self.output, "{LINE_BREAK}\nClasses\n{LINE_BREAK}")?;
        for role in Role::iter() {
            writeln!(self.output, "{}", PlayerClass::new(role, role.to_string()).fight_menu())?;
        }
        loop {
            let Some(line) = self.read_line("Select a class: ")? else {
                return Ok(None);
            };
            match line.trim().parse::<Role>() {
                Ok(role) => return Ok(Some(role)),
                Err(_) => writeln!(self.output, "Invalid selection, please select again")?,
            }
        }
    }

    pub fn choose_name(&mut self) -> io::Result<Option<String>> {
        Ok(self.read_line("Enter a name: ")?.map(|name| name.trim().to_string()))
    }

    /// Ask for an ability until the choice is valid and affordable.
    pub fn read_selection(&mut self, player: &PlayerClass) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.read_line("Select an ability: ")? else {
                return Ok(None);
            };
            match parse_selection(&line, player) {
                Ok(index) => return Ok(Some(index)),
                Err(rejection) => {
                    debug!(input = %line, ?rejection, "selection refused");
                    writeln!(self.output, "{}", rejection.message())?;
                }
            }
        }
    }

    fn pause(&mut self, prompt: &str) {
        if let Err(err) = self.read_line(prompt) {
            warn!(%err, "failed to read from console");
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}") {
            warn!(%err, "failed to write to console");
        }
    }
}

impl<R: BufRead, W: Write> BattleController for Console<R, W> {
    fn select_ability(&mut self, player: &PlayerClass, enemy: &Mob) -> Option<usize> {
        let status = format!(
            "{}\n{LINE_BREAK}\n{}",
            enemy.render_status(),
            player.render_status()
        );
        self.say(&status);

        match self.read_selection(player) {
            Ok(Some(index)) => {
                self.say(LINE_BREAK);
                Some(index)
            }
            Ok(None) => {
                self.say("\nInput closed, leaving the dungeon.");
                None
            }
            Err(err) => {
                warn!(%err, "console input failed");
                self.failure = Some(err);
                None
            }
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        if let Some(text) = narrate(event) {
            self.say(&text);
        }
        match event {
            GameEvent::Challenged { .. } => {
                self.pause("Press Enter");
                self.say(LINE_BREAK);
            }
            GameEvent::TurnEnded { .. } => {
                self.say(LINE_BREAK);
                self.pause("Press Enter to continue");
                self.say(LINE_BREAK);
            }
            GameEvent::Slain { .. } => self.pause("Press Enter to continue into dungeon"),
            _ => {}
        }
    }
}
