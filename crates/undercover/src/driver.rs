//! Line-based pass-and-play driver.
//!
//! Walks a [`Match`] through reveal, announcement, voting, results and
//! guesses, reading one line per decision. Closing the input abandons the
//! match anywhere. At the press-Enter prompts `q` also quits; the vote and
//! guess prompts take free text, so they only quit on [`QUIT_COMMAND`].

use anyhow::bail;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};
use undercover_engine::{EngineError, GuessOutcome, Match, Phase, Player, Winner};

/// Abandons the match from the vote or guess prompt.
pub const QUIT_COMMAND: &str = "/quit";

/// Drives a match over a text console.
#[derive(Debug)]
pub struct TableDriver<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> TableDriver<R, W> {
    /// Creates a driver. The screen is cleared between players by default.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: true,
        }
    }

    /// Turns clearing the terminal between secret screens on or off.
    pub fn with_screen_clearing(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Consumes the driver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays `game` to the end.
    ///
    /// Returns the winner, or `None` if the table quit early.
    #[instrument(skip_all)]
    pub fn run(&mut self, game: &mut Match) -> anyhow::Result<Option<Winner>> {
        if !self.reveal(game)? {
            return Ok(None);
        }

        loop {
            let phase = game.phase().clone();
            debug!(phase = phase.name(), "Driving phase");
            let keep_going = match phase {
                Phase::Announce { first_speaker } => self.announce(game, &first_speaker)?,
                Phase::Vote => self.vote(game)?,
                Phase::Result { eliminated } => self.result(game, &eliminated)?,
                Phase::Guess { guesser } => self.guess(game, &guesser)?,
                Phase::GameOver { winner } => {
                    self.game_over(game, winner)?;
                    return Ok(Some(winner));
                }
                Phase::Reveal { .. } => bail!("reveal phase re-entered after it finished"),
            };
            if !keep_going {
                warn!("Table quit the match");
                return Ok(None);
            }
        }
    }

    fn reveal(&mut self, game: &mut Match) -> anyhow::Result<bool> {
        while let Some(viewer) = game.current_viewer() {
            let name = viewer.name().to_string();
            let word = game.roster().display_word(viewer);

            self.clear()?;
            writeln!(self.output, "Pass the device to {}.", name)?;
            writeln!(self.output, "Press Enter when only {} can see the screen.", name)?;
            if !self.wait_for_enter()? {
                return Ok(false);
            }

            writeln!(self.output, "{}, your word is: {}", name, word)?;
            writeln!(self.output, "Memorize it, then press Enter.")?;
            if !self.wait_for_enter()? {
                return Ok(false);
            }
            self.clear()?;
            game.advance_reveal()?;
        }
        Ok(true)
    }

    fn announce(&mut self, game: &mut Match, first_speaker: &str) -> anyhow::Result<bool> {
        writeln!(self.output, "All players have seen their words!")?;
        writeln!(self.output, "{} starts the discussion.", first_speaker)?;
        writeln!(self.output, "Press Enter to start voting.")?;
        if !self.wait_for_enter()? {
            return Ok(false);
        }
        game.begin_vote()?;
        Ok(true)
    }

    fn vote(&mut self, game: &mut Match) -> anyhow::Result<bool> {
        loop {
            writeln!(self.output, "Who has the most votes?")?;
            for (i, p) in game.roster().players().iter().enumerate() {
                let marker = if game.state().is_eliminated(p.name()) { " (out)" } else { "" };
                writeln!(self.output, "  {}. {}{}", i + 1, p.name(), marker)?;
            }
            write!(self.output, "Number or name ({} to stop): ", QUIT_COMMAND)?;
            self.output.flush()?;

            let Some(choice) = self.read_answer()? else {
                return Ok(false);
            };
            let Some(name) = pick_player(game.roster().players(), &choice) else {
                writeln!(self.output, "No player matches {:?}.", choice)?;
                continue;
            };

            match game.eliminate(&name) {
                Ok(_) => return Ok(true),
                Err(e @ (EngineError::AlreadyEliminated(_) | EngineError::UnknownPlayer(_))) => {
                    writeln!(self.output, "{}.", e)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn result(&mut self, game: &mut Match, eliminated: &Player) -> anyhow::Result<bool> {
        writeln!(self.output, "ELIMINATED: {} was {}.", eliminated.name(), eliminated.role())?;
        writeln!(self.output, "Press Enter to continue.")?;
        if !self.wait_for_enter()? {
            return Ok(false);
        }
        game.continue_after_result()?;
        Ok(true)
    }

    fn guess(&mut self, game: &mut Match, guesser: &Player) -> anyhow::Result<bool> {
        writeln!(self.output, "MR. WHITE'S LAST CHANCE!")?;
        writeln!(
            self.output,
            "{}, guess the civilian word to win. Guessing the undercover word helps them instead.",
            guesser.name()
        )?;

        let guess = loop {
            write!(self.output, "Your guess: ")?;
            self.output.flush()?;
            match self.read_answer()? {
                None => return Ok(false),
                Some(g) if g.trim().is_empty() => continue,
                Some(g) => break g,
            }
        };

        let outcome = game.submit_guess(&guess)?;
        let message = match outcome {
            GuessOutcome::CivilianWord => "Correct! That is the civilian word.",
            GuessOutcome::UndercoverWord => "That is the undercover word.",
            GuessOutcome::Wrong => "Wrong guess.",
        };
        writeln!(self.output, "{}", message)?;
        Ok(true)
    }

    fn game_over(&mut self, game: &Match, winner: Winner) -> anyhow::Result<()> {
        writeln!(self.output, "GAME OVER: {}!", winner)?;
        writeln!(self.output, "All roles revealed:")?;
        for p in game.roster().players() {
            if p.word().is_empty() {
                writeln!(self.output, "  {}: {}", p.name(), p.role())?;
            } else {
                writeln!(self.output, "  {}: {} (word: {})", p.name(), p.role(), p.word())?;
            }
        }
        Ok(())
    }

    /// Reads one trimmed line. `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// False when the table quits with `q` or closes the input.
    fn wait_for_enter(&mut self) -> anyhow::Result<bool> {
        Ok(self
            .read_line()?
            .is_some_and(|line| !line.eq_ignore_ascii_case("q")))
    }

    /// Free-text answer. `None` on [`QUIT_COMMAND`] or end of input.
    fn read_answer(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self
            .read_line()?
            .filter(|line| !line.eq_ignore_ascii_case(QUIT_COMMAND)))
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

/// Resolves a 1-based seat number or a case-insensitive name.
fn pick_player(players: &[Player], choice: &str) -> Option<String> {
    let choice = choice.trim();
    if let Ok(n) = choice.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| players.get(i))
            .map(|p| p.name().to_string());
    }
    let wanted = choice.to_lowercase();
    players
        .iter()
        .find(|p| p.name().to_lowercase() == wanted)
        .map(|p| p.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use undercover_engine::{MatchSetup, MemoryLastStarter, Role, RoleCounts, SecureRng, WordPair};

    fn dealt(names: [&str; 4], seed: u64) -> Match {
        let mut rng = SecureRng::from_seed(seed);
        MatchSetup::new(names)
            .with_counts(RoleCounts::new(1, 1))
            .start(&WordPair::new("Frog", "Toad"), &mut MemoryLastStarter::new(), &mut rng)
            .unwrap()
    }

    /// Enter for every reveal and the announcement, then `answers`.
    fn script(answers: &[&str]) -> Cursor<Vec<u8>> {
        let mut lines = vec![""; 9];
        lines.extend_from_slice(answers);
        Cursor::new(format!("{}\n", lines.join("\n")).into_bytes())
    }

    #[test]
    fn test_player_named_q_can_be_voted_out() {
        let mut game = dealt(["Q", "Bo", "Cy", "Di"], 5);
        let mut driver = TableDriver::new(script(&["q"]), Vec::new()).with_screen_clearing(false);

        let winner = driver.run(&mut game).unwrap();
        assert_eq!(winner, None);
        assert_eq!(game.state().eliminated(), ["Q".to_string()]);
    }

    #[test]
    fn test_guess_q_is_a_guess() {
        let mut game = dealt(["Ana", "Bo", "Cy", "Di"], 6);
        let mr_white = game
            .roster()
            .players()
            .iter()
            .find(|p| p.role() == Role::MrWhite)
            .unwrap()
            .name()
            .to_string();

        let mut driver =
            TableDriver::new(script(&[mr_white.as_str(), "", "q"]), Vec::new()).with_screen_clearing(false);
        let winner = driver.run(&mut game).unwrap();
        assert_eq!(winner, Some(Winner::Civilians));

        let text = String::from_utf8(driver.into_output()).unwrap();
        assert!(text.contains("Wrong guess."));
    }

    #[test]
    fn test_quit_command_leaves_vote() {
        let mut game = dealt(["Ana", "Bo", "Cy", "Di"], 7);
        let mut driver =
            TableDriver::new(script(&["/QUIT"]), Vec::new()).with_screen_clearing(false);
        assert_eq!(driver.run(&mut game).unwrap(), None);
        assert!(game.state().eliminated().is_empty());
        assert_eq!(game.phase(), &Phase::Vote);
    }

    #[test]
    fn test_q_quits_at_reveal() {
        let mut game = dealt(["Ana", "Bo", "Cy", "Di"], 8);
        let mut driver = TableDriver::new(Cursor::new(b"q\n".to_vec()), Vec::new())
            .with_screen_clearing(false);
        assert_eq!(driver.run(&mut game).unwrap(), None);
        assert!(matches!(game.phase(), Phase::Reveal { index: 0 }));
    }

    #[test]
    fn test_pick_by_number_and_name() {
        let players = vec![
            Player::new("Ana", Role::Civilian, "a"),
            Player::new("Bo", Role::MrWhite, ""),
        ];
        assert_eq!(pick_player(&players, "2").as_deref(), Some("Bo"));
        assert_eq!(pick_player(&players, " ana ").as_deref(), Some("Ana"));
        assert_eq!(pick_player(&players, "0"), None);
        assert_eq!(pick_player(&players, "3"), None);
        assert_eq!(pick_player(&players, "Cy"), None);
    }
}
