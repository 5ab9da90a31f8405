use std::io::{self, BufRead, Write};

use color_eyre::{eyre::eyre, owo_colors::OwoColorize};
use cube_core::{Action, CubeState, Face, apply_all};
use log::{debug, info};
use notation::compile_notation;

use crate::config::{Config, FaceArg};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command<'a> {
    Reset,
    Focus(Face),
    Show,
    Exit,
    Moves(&'a str),
    Nothing,
}

fn parse_command(line: &str) -> color_eyre::Result<Command<'_>> {
    let line = line.trim();

    Ok(match line.split_once(char::is_whitespace) {
        Some(("focus", face)) => Command::Focus(FaceArg::parse(face)?),
        _ => match line {
            "" => Command::Nothing,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "exit" | "quit" => Command::Exit,
            "focus" => return Err(eyre!("Usage: focus <face>")),
            moves => Command::Moves(moves),
        },
    })
}

/// The running cube of an interactive session
pub struct Session {
    config: Config,
    cube: CubeState,
}

impl Session {
    /// A solved cube turned to the configured focus
    pub fn new(config: Config) -> color_eyre::Result<Session> {
        let cube = start_state(&config)?;
        Ok(Session { config, cube })
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    /// Handle one line, writing any output to `out`. Returns `false` once the
    /// session should end.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> color_eyre::Result<bool> {
        match parse_command(line)? {
            Command::Nothing => {}
            Command::Exit => return Ok(false),
            Command::Show => write!(out, "{}", self.cube)?,
            Command::Reset => {
                self.cube = start_state(&self.config)?;
                info!("Reset to a solved cube of size {}", self.config.size);
            }
            Command::Focus(focus_face) => {
                self.cube = Action::RotateCube { focus_face }.apply(&self.cube)?;
                info!("Turned {focus_face} to the front");
            }
            Command::Moves(text) => {
                let actions = compile_notation(text, self.config.size)
                    .map_err(|err| eyre!("{}", err.diagnostic()))?;
                debug!("Applying {} actions", actions.len());

                self.cube = apply_all(&self.cube, &actions)?;

                if self.cube.is_solved() {
                    writeln!(out, "{}", "Solved".green())?;
                }
            }
        }

        Ok(true)
    }
}

/// A solved cube of the configured size turned to the configured focus
pub fn start_state(config: &Config) -> color_eyre::Result<CubeState> {
    let cube = CubeState::new_solved(config.size)?;

    Ok(match config.focus {
        Face::Front => cube,
        focus_face => Action::RotateCube { focus_face }.apply(&cube)?,
    })
}

/// Read lines from stdin until `exit` or the end of input. Errors are
/// reported and the session continues.
pub fn run(config: Config) -> color_eyre::Result<()> {
    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    eprintln!("Enter moves, or one of `reset`, `focus <face>`, `show`, `exit`");

    loop {
        eprint!("> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match session.handle(&line, &mut stdout) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => eprintln!("{} {err}", "Error:".red()),
        }
    }

    Ok(())
}
