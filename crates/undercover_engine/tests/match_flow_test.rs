//! Tests for the match lifecycle.

use undercover_engine::{
    EngineError, GuessOutcome, LastStarterStore, Match, MatchSetup, MemoryLastStarter, Phase, Role,
    RoleCounts, SecureRng, Winner, WordPair,
};

fn pair() -> WordPair {
    WordPair::new("Café", "Tea")
}

/// Starts a match and walks it to the vote phase.
fn voting_match(names: &[&str], counts: RoleCounts, seed: u64) -> Match {
    let mut store = MemoryLastStarter::new();
    let mut rng = SecureRng::from_seed(seed);
    let mut game = MatchSetup::new(names.iter().copied())
        .with_counts(counts)
        .start(&pair(), &mut store, &mut rng)
        .expect("valid setup");
    while game.current_viewer().is_some() {
        game.advance_reveal().expect("reveal");
    }
    game.begin_vote().expect("vote");
    game
}

fn first_with(game: &Match, role: Role) -> String {
    game.state()
        .alive()
        .find(|p| p.role() == role)
        .map(|p| p.name().to_string())
        .expect("role present")
}

fn eliminate_and_continue(game: &mut Match, name: &str) -> Phase {
    game.eliminate(name).expect("valid vote");
    game.continue_after_result().expect("result").clone()
}

#[test]
fn test_reveal_walks_speaking_order_once() {
    let mut store = MemoryLastStarter::new();
    let mut rng = SecureRng::from_seed(42);
    let mut game = MatchSetup::new(["Ana", "Bo", "Cy", "Di", "Eve"])
        .start(&pair(), &mut store, &mut rng)
        .expect("valid setup");

    let mut viewers = Vec::new();
    while let Some(viewer) = game.current_viewer() {
        viewers.push(viewer.name().to_string());
        game.advance_reveal().expect("reveal");
    }
    assert_eq!(viewers, game.state().speaking_order());

    match game.phase() {
        Phase::Announce { first_speaker } => {
            assert_eq!(first_speaker, &viewers[0]);
            assert_eq!(store.last_starter().as_deref(), Some(first_speaker.as_str()));
        }
        other => panic!("expected announce, got {:?}", other),
    }
}

#[test]
fn test_undercover_out_continues_voting() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 1);
    let undercover = first_with(&game, Role::Undercover);
    assert_eq!(eliminate_and_continue(&mut game, &undercover), Phase::Vote);
    assert_eq!(game.state().eliminated(), [undercover.clone()]);
    assert_eq!(game.state().last_eliminated().map(|p| p.name()), Some(undercover.as_str()));
}

#[test]
fn test_mr_white_out_goes_to_guess() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 2);
    let white = first_with(&game, Role::MrWhite);
    match eliminate_and_continue(&mut game, &white) {
        Phase::Guess { guesser } => assert_eq!(guesser.name(), white),
        other => panic!("expected guess, got {:?}", other),
    }
}

#[test]
fn test_guessing_civilian_word_wins_for_mr_white() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 3);
    let white = first_with(&game, Role::MrWhite);
    eliminate_and_continue(&mut game, &white);

    let civilian_word = game.roster().civilian_word().clone();
    let guess = format!("  {}  ", civilian_word.to_uppercase());
    assert_eq!(game.submit_guess(&guess), Ok(GuessOutcome::CivilianWord));
    assert_eq!(game.winner(), Some(Winner::MrWhite));
}

#[test]
fn test_guessing_undercover_word_hands_win_to_undercovers() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 4);
    let white = first_with(&game, Role::MrWhite);
    eliminate_and_continue(&mut game, &white);

    let undercover_word = game.roster().undercover_word().clone();
    assert_eq!(game.submit_guess(&undercover_word), Ok(GuessOutcome::UndercoverWord));
    assert_eq!(game.winner(), Some(Winner::Undercovers));
}

#[test]
fn test_wrong_guess_with_last_mr_white_hands_win_to_civilians() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 5);
    let white = first_with(&game, Role::MrWhite);
    eliminate_and_continue(&mut game, &white);

    assert_eq!(game.submit_guess("definitely not it"), Ok(GuessOutcome::Wrong));
    assert_eq!(game.winner(), Some(Winner::Civilians));
}

#[test]
fn test_wrong_guess_with_another_mr_white_keeps_voting() {
    let names = ["Ana", "Bo", "Cy", "Di", "Eve", "Fay", "Gus"];
    let mut game = voting_match(&names, RoleCounts::new(1, 2), 6);
    let white = first_with(&game, Role::MrWhite);
    eliminate_and_continue(&mut game, &white);

    assert_eq!(game.submit_guess("nope"), Ok(GuessOutcome::Wrong));
    assert_eq!(game.phase(), &Phase::Vote);

    // The second Mr. White gets a guess of their own.
    let second = first_with(&game, Role::MrWhite);
    assert_ne!(second, white);
    assert!(matches!(
        eliminate_and_continue(&mut game, &second),
        Phase::Guess { .. }
    ));
}

#[test]
fn test_civilians_outnumbered_impostors_win() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di"], RoleCounts::new(1, 1), 7);
    let civilian = first_with(&game, Role::Civilian);
    assert_eq!(
        eliminate_and_continue(&mut game, &civilian),
        Phase::GameOver { winner: Winner::Impostors }
    );
}

#[test]
fn test_final_two_with_mr_white_wins_for_mr_white() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di"], RoleCounts::new(1, 1), 8);
    let undercover = first_with(&game, Role::Undercover);
    assert_eq!(eliminate_and_continue(&mut game, &undercover), Phase::Vote);

    let civilian = first_with(&game, Role::Civilian);
    assert_eq!(
        eliminate_and_continue(&mut game, &civilian),
        Phase::GameOver { winner: Winner::MrWhite }
    );
}

#[test]
fn test_double_vote_rejected() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve", "Fay"], RoleCounts::new(1, 1), 9);
    let undercover = first_with(&game, Role::Undercover);
    assert_eq!(eliminate_and_continue(&mut game, &undercover), Phase::Vote);

    assert_eq!(
        game.eliminate(&undercover),
        Err(EngineError::AlreadyEliminated(undercover.clone()))
    );
    assert_eq!(game.phase(), &Phase::Vote);
}

#[test]
fn test_unknown_player_rejected() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di"], RoleCounts::random(), 10);
    assert_eq!(
        game.eliminate("Zed"),
        Err(EngineError::UnknownPlayer("Zed".to_string()))
    );
}

#[test]
fn test_out_of_turn_operations_rejected() {
    let mut store = MemoryLastStarter::new();
    let mut rng = SecureRng::from_seed(11);
    let mut game = MatchSetup::new(["Ana", "Bo", "Cy", "Di"])
        .start(&pair(), &mut store, &mut rng)
        .expect("valid setup");

    assert!(matches!(
        game.eliminate("Ana"),
        Err(EngineError::WrongPhase { expected: "Vote", actual: "Reveal" })
    ));
    assert!(matches!(game.submit_guess("tea"), Err(EngineError::WrongPhase { .. })));
    assert!(matches!(game.begin_vote(), Err(EngineError::WrongPhase { .. })));
    assert!(matches!(game.continue_after_result(), Err(EngineError::WrongPhase { .. })));
}

#[test]
fn test_eliminated_players_leave_speaking_order() {
    let mut game = voting_match(&["Ana", "Bo", "Cy", "Di", "Eve"], RoleCounts::new(1, 1), 12);
    let out = first_with(&game, Role::Undercover);
    assert_eq!(eliminate_and_continue(&mut game, &out), Phase::Vote);

    let alive: Vec<&str> = game
        .state()
        .alive_in_speaking_order()
        .iter()
        .map(|p| p.name())
        .collect();
    let expected: Vec<&str> = game
        .state()
        .speaking_order()
        .iter()
        .map(String::as_str)
        .filter(|n| *n != out)
        .collect();
    assert_eq!(alive.len(), 4);
    assert_eq!(alive, expected);
}

#[test]
fn test_cancel_keeps_table() {
    let game = voting_match(&["Ana", "Bo", "Cy", "Di"], RoleCounts::new(1, 1), 13);
    let setup = game.cancel();
    assert_eq!(setup.names(), ["Ana", "Bo", "Cy", "Di"]);
    assert_eq!(setup.counts(), RoleCounts::new(1, 1));
}

#[test]
fn test_invalid_setup_surfaces_immediately() {
    let mut store = MemoryLastStarter::new();
    let mut rng = SecureRng::from_seed(14);
    let result = MatchSetup::new(["Ana", "Bo", "Cy"]).start(&pair(), &mut store, &mut rng);
    assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    assert_eq!(store.last_starter().as_deref(), None);
}
