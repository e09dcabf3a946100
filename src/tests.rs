use crate::derivatives::*;
use crate::dfa::*;
use crate::regex::Regex::*;
use crate::regex::*;
use crate::strings::binary_strings;

fn re(s: &str) -> Regex<char> {
    s.parse::<Regex<char>>().unwrap()
}

#[test]
fn test_regex_parse() {
    assert_eq!(re("").normalize(), Empty);
    assert_eq!(re("a").normalize(), Alt(vec!['a'], vec![]));
    assert_eq!(re("abc").normalize(),
        Cat(vec![Alt(vec!['a'], vec![]),
                 Alt(vec!['b'], vec![]),
                 Alt(vec!['c'], vec![])]));
    assert_eq!(re("ab*").normalize(),
        Cat(vec![Alt(vec!['a'], vec![]),
                 Kleene(Box::new(Alt(vec!['b'], vec![])))]));
    assert_eq!(re("[a-d)]").normalize(),
        Alt(vec![')', 'a', 'b', 'c', 'd'], vec![]));
    assert_eq!(re("[^a-d]").normalize(),
        Except(vec!['a', 'b', 'c', 'd']));
    assert_eq!(re("[]").normalize(), Null);
    assert_eq!(re("~").normalize(), Not(Box::new(Empty)));
    assert_eq!(re("~[]").normalize(), Not(Box::new(Null)));
    assert_eq!(re("a.|bc*").normalize(),
        Alt(vec![], vec![
            Cat(vec![Alt(vec!['a'], vec![]), Except(vec![])]),
            Cat(vec![Alt(vec!['b'], vec![]), Kleene(Box::new(Alt(vec!['c'], vec![])))])
        ]));
    assert_eq!(re("a|b&c").normalize(),
        Alt(vec!['a'], vec![And(vec![Alt(vec!['b'], vec![]), Alt(vec!['c'], vec![])])]));
    assert_eq!(re("a&b|c").normalize(),
        Alt(vec!['c'], vec![And(vec![Alt(vec!['a'], vec![]), Alt(vec!['b'], vec![])])]));
    assert_eq!(re("~a").normalize(),
        Not(Box::new(Alt(vec!['a'], vec![]))));
    assert_eq!(re("~b*").normalize(),
        Not(Box::new(Kleene(Box::new(Alt(vec!['b'], vec![]))))));
    assert_eq!(re("a&b*").normalize(),
        And(vec![Alt(vec!['a'], vec![]), Kleene(Box::new(Alt(vec!['b'], vec![])))]));
    assert_eq!(re("\\[").normalize(), Alt(vec!['['], vec![]));
    assert_eq!(re("[\\[]").normalize(), Alt(vec!['['], vec![]));
    assert_eq!(re("[\\]]").normalize(), Alt(vec![']'], vec![]));
    assert_eq!(re("(\\))").normalize(), Alt(vec![')'], vec![]));
    assert_eq!(re("0?").normalize(), Alt(vec!['0'], vec![Empty]));
    assert_eq!(re("(0|1)*").normalize(), Kleene(Box::new(Alt(vec!['0', '1'], vec![]))));
}

#[test]
fn test_regex_parse_error() {
    assert!("*".parse::<Regex<char>>().is_err());
    assert!("*a".parse::<Regex<char>>().is_err());
    assert!("?".parse::<Regex<char>>().is_err());
    assert!("a~b".parse::<Regex<char>>().is_err());
    assert!("a*~".parse::<Regex<char>>().is_err());
    assert!("[asdf".parse::<Regex<char>>().is_err());
    assert!("[a-z".parse::<Regex<char>>().is_err());
    assert!("&*".parse::<Regex<char>>().is_err());
    assert!("|*".parse::<Regex<char>>().is_err());
    assert!("(".parse::<Regex<char>>().is_err());
    assert!("(()".parse::<Regex<char>>().is_err());
    assert!(")()".parse::<Regex<char>>().is_err());
    assert!(")(".parse::<Regex<char>>().is_err());
    assert!("(]".parse::<Regex<char>>().is_err());
    assert!("(])".parse::<Regex<char>>().is_err());
    assert!("\\".parse::<Regex<char>>().is_err());
    assert_eq!("[\u{d7ff}-\u{e000}]".parse::<Regex<char>>(),
        Err(ParseError::BadRange("range contains bad codepoints", '\u{d7ff}', '\u{e000}')));
    assert_eq!("(".parse::<Regex<char>>(), Err(ParseError::UnexpectedEof("unmatched '('")));
}

#[test]
fn test_derivative_classes() {
    let d = re("0(0|1)*").normalize().derivative();
    assert_eq!(d.get('0').clone().normalize(), Kleene(Box::new(Alt(vec!['0', '1'], vec![]))));
    assert_eq!(d.get('1').clone().normalize(), Null);
    assert_eq!(d.get('x').clone().normalize(), Null);
}

#[test]
fn test_regex_matches() {
    let r = re("(0|1)*0");
    assert!(r.matches("0"));
    assert!(r.matches("1110"));
    assert!(!r.matches(""));
    assert!(!r.matches("01"));

    let r = re("01");
    assert!(r.matches("01"));
    assert!(!r.matches("010"));
    assert!(!r.matches("0"));
}

#[test]
fn test_dfa_states() {
    // start, dead, then "after 0", "after 01"
    let dfa = Dfa::from_regex(re("01"));
    assert_eq!(dfa.len(), 4);
    assert!(!dfa.transitions[DFA_START as usize].accepting);
    assert!(!dfa.transitions[DFA_DEAD as usize].accepting);
    assert_eq!(dfa.next_state(DFA_DEAD, '0'), DFA_DEAD);

    let dfa = Dfa::from_regex(re("(0|1)*"));
    assert_eq!(dfa.next_state(DFA_START, '0'), DFA_START);
    assert_eq!(dfa.next_state(DFA_START, '1'), DFA_START);
    assert!(dfa.matches(""));
}

#[test]
fn test_dfa_agrees_with_derivatives() {
    let patterns = [
        "01",
        "(0|1)*0",
        "0*1*",
        "(01)+",
        "1?0*",
        "(0|1)*&~((0|1)*11(0|1)*)",
        "((0|1)(0|1))*",
        "[01]*1[01]",
        "~(0*)",
    ];
    for pattern in patterns.iter() {
        let r = re(pattern);
        let dfa = Dfa::from_regex(r.clone());
        for s in std::iter::once(String::new()).chain(binary_strings(8)) {
            assert_eq!(dfa.matches(&s), r.matches(&s), "{} on {:?}", pattern, s);
        }
    }
}

#[test]
fn test_complement_and_intersection() {
    let dfa = Dfa::from_regex(re("(0|1)*&~((0|1)*11(0|1)*)"));
    assert!(dfa.matches(""));
    assert!(dfa.matches("10101"));
    assert!(!dfa.matches("0110"));
    assert!(!dfa.matches("2"));
}
