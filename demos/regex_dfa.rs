use dfagame::dfa::Normalize;
use dfagame::strings::binary_strings;
use dfagame::*;
use std::io::BufRead;

// Reads one regex per line and shows the DFA the game checks players against.
fn main() {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        };
        match line.trim().parse::<Regex<char>>() {
            Err(e) => println!("error: {}", e),
            Ok(x) => {
                println!("ok: {:?}", x);
                let x = x.normalize();
                println!("{:?}", x);
                let dfa = Dfa::from_regex(x);
                println!("DFA ({} states): {:?}\n", dfa.len(), dfa);
                let accepted: Vec<String> = std::iter::once(String::new())
                    .chain(binary_strings(4))
                    .filter(|s| dfa.matches(s))
                    .collect();
                println!("accepted up to length 4: {:?}\n", accepted);
            }
        }
    }
}
