use dfagame::session::{Outcome, Session};
use dfagame::*;

const ORIGIN: Coord = Coord::new(1, 1);

fn game(target: &str) -> Game {
    Game::new(GameConfig {
        target: target.to_string(),
        ..GameConfig::default()
    })
    .unwrap()
}

#[test]
fn solve_default_target() {
    let mut game = game("01");
    let a = game.automaton_mut();
    let (q0, q1, dead) = (Coord::new(1, 2), Coord::new(1, 3), Coord::new(2, 2));
    assert!(a.add_state(q0, false));
    assert!(a.add_state(q1, true));
    assert!(a.add_state(dead, false));
    a.add_transition(ORIGIN, q0, SymbolSet::ZERO).unwrap();
    a.add_transition(ORIGIN, dead, SymbolSet::ONE).unwrap();
    a.add_transition(q0, q1, SymbolSet::ONE).unwrap();
    a.add_transition(q0, dead, SymbolSet::ZERO).unwrap();
    a.add_transition(q1, dead, SymbolSet::BOTH).unwrap();
    a.add_transition(dead, dead, SymbolSet::BOTH).unwrap();

    assert!(game.automaton().is_complete());
    assert_eq!(game.check(), Verdict::Correct);
    assert_eq!(game.check().to_string(), "Congratulations!");
}

#[test]
fn wrong_language_reports_counterexample() {
    let mut game = game("(0|1)*0");
    let a = game.automaton_mut();
    a.toggle_accept(ORIGIN);
    a.add_transition(ORIGIN, ORIGIN, SymbolSet::BOTH).unwrap();
    assert_eq!(
        game.check(),
        Verdict::Incorrect {
            counterexample: String::new()
        }
    );

    // fix the empty string, still wrong on "1"
    let mut game = self::game("(0|1)*0");
    let a = game.automaton_mut();
    let q = Coord::new(0, 0);
    a.add_state(q, true);
    a.add_transition(ORIGIN, q, SymbolSet::BOTH).unwrap();
    a.add_transition(q, q, SymbolSet::BOTH).unwrap();
    assert_eq!(
        game.check(),
        Verdict::Incorrect {
            counterexample: "1".to_string()
        }
    );
}

#[test]
fn removing_a_state_invalidates_the_board() {
    let mut game = game("(0|1)*");
    let a = game.automaton_mut();
    let q = Coord::new(4, 4);
    a.toggle_accept(ORIGIN);
    a.add_state(q, true);
    a.add_transition(ORIGIN, q, SymbolSet::BOTH).unwrap();
    a.add_transition(q, ORIGIN, SymbolSet::BOTH).unwrap();
    assert_eq!(game.check(), Verdict::Correct);

    assert!(game.automaton_mut().remove_state(q));
    assert_eq!(game.check(), Verdict::Invalid);
}

fn say(session: &mut Session, line: &str) -> String {
    match session.handle_line(line) {
        Outcome::Continue(msg) => msg,
        Outcome::Quit => panic!("session quit on {:?}", line),
    }
}

#[test]
fn session_plays_a_round() {
    let mut session = Session::new(game("1*"));
    assert_eq!(say(&mut session, "check"), "Your DFA is invalid.");
    assert_eq!(say(&mut session, "accept 1 1"), "state at (r=1,c=1) is now accepting");
    assert_eq!(say(&mut session, "state 0 0"), "added state at (r=0,c=0)");
    assert_eq!(say(&mut session, "state 0 0"), "cannot place a state at (r=0,c=0)");
    assert_eq!(say(&mut session, "edge 1 1 1 1 1"), "(r=1,c=1) --1--> (r=1,c=1)");
    assert_eq!(
        say(&mut session, "edge 1 1 1 1 0"),
        "a transition from (r=1,c=1) to (r=1,c=1) already exists; remove it first"
    );
    assert_eq!(say(&mut session, "edge 1 1 3 3 0"), "no state at (r=3,c=3)");
    assert_eq!(
        say(&mut session, "run 10"),
        "cannot run \"10\": no transition from (r=1,c=1) on 0"
    );
    say(&mut session, "edge 1 1 0 0 0");
    say(&mut session, "edge 0 0 0 0 01");
    assert_eq!(say(&mut session, "run 11"), "\"11\" is accepted");
    assert_eq!(say(&mut session, "run 10"), "\"10\" is rejected");
    assert_eq!(say(&mut session, "check"), "Congratulations!");

    assert_eq!(say(&mut session, "remove 1 1"), "the start state cannot be removed");
    assert_eq!(say(&mut session, "remove 2 2"), "no state at (r=2,c=2)");
    assert_eq!(say(&mut session, "unedge 0 0 0 0"), "erased (r=0,c=0) -> (r=0,c=0)");
    assert_eq!(say(&mut session, "check"), "Your DFA is invalid.");
    assert_eq!(say(&mut session, ""), "");
    assert!(say(&mut session, "jump").starts_with("error: unknown command 'jump'"));
    assert_eq!(session.handle_line("quit"), Outcome::Quit);
}

#[test]
fn session_renders_board() {
    let mut session = Session::new(game("0"));
    say(&mut session, "state 0 1");
    say(&mut session, "accept 0 1");
    say(&mut session, "edge 1 1 0 1 0");
    assert_eq!(
        session.render(),
        "target: 0\n \
         . @ . . .\n \
         .>o . . .\n \
         . . . . .\n \
         . . . . .\n \
         . . . . .\n\
         (r=1,c=1) --0--> (r=0,c=1)"
    );
}
