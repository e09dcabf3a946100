use std::cmp::Ordering;
use std::iter::Peekable;

use crate::regex::Regex;
use crate::regex::Regex::*;

/// The derivatives of some value with respect to every character, grouped by
/// character class.
///
/// `d` lists disjoint character sets together with the derivative shared by
/// all of them; every character not mentioned in `d` has derivative `rest`.
#[derive(Debug, Clone)]
pub struct Derivatives<R> {
    pub d: Vec<(Vec<char>, R)>,
    pub rest: R,
}

impl<R> Derivatives<R> {
    pub fn map<S, F: FnMut(R) -> S>(self, mut f: F) -> Derivatives<S> {
        Derivatives {
            d: self.d.into_iter().map(|(x, r)| (x, f(r))).collect(),
            rest: f(self.rest),
        }
    }

    /// The derivative with respect to `c`.
    pub fn get(&self, c: char) -> &R {
        self.d
            .iter()
            .find(|(chars, _)| chars.binary_search(&c).is_ok())
            .map(|(_, r)| r)
            .unwrap_or(&self.rest)
    }
}

pub trait Differentiable: Sized {
    fn derivative(&self) -> Derivatives<Self>;
}

struct Union<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> {
    a: Peekable<It1>,
    b: Peekable<It2>,
}
fn union<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>>(
    a: It1,
    b: It2,
) -> Union<T, It1, It2> {
    Union {
        a: a.peekable(),
        b: b.peekable(),
    }
}
impl<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> Iterator for Union<T, It1, It2> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        let order = match (self.a.peek(), self.b.peek()) {
            (Some(av), Some(bv)) => av.cmp(bv),
            (Some(_), None) => Ordering::Less,
            (None, _) => Ordering::Greater,
        };
        match order {
            Ordering::Less => self.a.next(),
            Ordering::Greater => self.b.next(),
            Ordering::Equal => {
                self.a.next();
                self.b.next()
            }
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a1, a2) = self.a.size_hint();
        let (b1, b2) = self.b.size_hint();
        (
            a1.max(b1),
            if let (Some(a2), Some(b2)) = (a2, b2) {
                Some(a2 + b2)
            } else {
                None
            },
        )
    }
}

struct Inter<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> {
    a: Peekable<It1>,
    b: Peekable<It2>,
}
fn inter<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>>(
    a: It1,
    b: It2,
) -> Inter<T, It1, It2> {
    Inter {
        a: a.peekable(),
        b: b.peekable(),
    }
}
impl<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> Iterator for Inter<T, It1, It2> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        loop {
            let order = match (self.a.peek(), self.b.peek()) {
                (Some(av), Some(bv)) => av.cmp(bv),
                _ => return None,
            };
            match order {
                Ordering::Less => {
                    self.a.next();
                }
                Ordering::Greater => {
                    self.b.next();
                }
                Ordering::Equal => {
                    self.a.next();
                    return self.b.next();
                }
            }
        }
    }
}

struct Subtract<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> {
    a: Peekable<It1>,
    b: Peekable<It2>,
}
fn subtract<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>>(
    a: It1,
    b: It2,
) -> Subtract<T, It1, It2> {
    Subtract {
        a: a.peekable(),
        b: b.peekable(),
    }
}
impl<T: Ord, It1: Iterator<Item = T>, It2: Iterator<Item = T>> Iterator
    for Subtract<T, It1, It2>
{
    type Item = T;
    fn next(&mut self) -> Option<T> {
        loop {
            let order = match (self.a.peek(), self.b.peek()) {
                (Some(av), Some(bv)) => av.cmp(bv),
                (Some(_), None) => Ordering::Less,
                (None, _) => return None,
            };
            match order {
                Ordering::Less => return self.a.next(),
                Ordering::Greater => {
                    self.b.next();
                }
                Ordering::Equal => {
                    self.a.next();
                    self.b.next();
                }
            }
        }
    }
}

enum CharSet {
    Just(Vec<char>),
    Not(Vec<char>),
}

impl CharSet {
    fn inter(&self, b: &[char]) -> CharSet {
        match *self {
            CharSet::Just(ref a) => {
                CharSet::Just(inter(a.iter().copied(), b.iter().copied()).collect())
            }
            CharSet::Not(ref a) => {
                CharSet::Just(subtract(b.iter().copied(), a.iter().copied()).collect())
            }
        }
    }
    fn subtract(&self, b: &[char]) -> CharSet {
        match *self {
            CharSet::Just(ref a) => {
                CharSet::Just(subtract(a.iter().copied(), b.iter().copied()).collect())
            }
            CharSet::Not(ref a) => {
                CharSet::Not(union(a.iter().copied(), b.iter().copied()).collect())
            }
        }
    }
}

/// Refines the partitions of `v` into their common refinement, calling `f`
/// with one derivative from each input for every resulting class.
fn combine<R, S, F: FnMut(&[&R]) -> S>(v: &[Derivatives<R>], mut f: F) -> Derivatives<S> {
    fn go<'a, R, S, F: FnMut(&[&R]) -> S>(
        v: &'a [Derivatives<R>],
        f: &mut F,
        what: CharSet,
        res: &mut Vec<&'a R>,
        out: &mut (Vec<(Vec<char>, S)>, Option<S>),
    ) {
        if let CharSet::Just(ref v) = what {
            if v.is_empty() {
                // prune
                return;
            }
        }
        let (first, rest) = match v.split_first() {
            Some(split) => split,
            None => {
                let reg = f(&res[..]);
                match what {
                    CharSet::Just(c) => out.0.push((c, reg)),
                    CharSet::Not(_) => {
                        debug_assert!(out.1.is_none());
                        out.1 = Some(reg);
                    }
                }
                return;
            }
        };
        let mut all_chars = Vec::new();
        for (chars, reg) in first.d.iter() {
            all_chars = union(all_chars.into_iter(), chars.iter().copied()).collect();
            let inter = what.inter(chars);
            res.push(reg);
            go(rest, f, inter, res, out);
            res.pop();
        }
        let inter = what.subtract(&all_chars);
        res.push(&first.rest);
        go(rest, f, inter, res, out);
        res.pop();
    }
    let mut result = (Vec::new(), None);
    let mut regexes = Vec::new();
    go(
        v,
        &mut f,
        CharSet::Not(Vec::new()),
        &mut regexes,
        &mut result,
    );
    // The complement class is never pruned, so `rest` is always set.
    let rest = match result.1 {
        Some(rest) => rest,
        None => f(&v.iter().map(|d| &d.rest).collect::<Vec<_>>()),
    };
    Derivatives { d: result.0, rest }
}

impl Differentiable for Regex<char> {
    fn derivative(&self) -> Derivatives<Regex<char>> {
        match *self {
            Null => Derivatives {
                d: Vec::new(),
                rest: Null,
            },
            Empty => Derivatives {
                d: Vec::new(),
                rest: Null,
            },
            Except(ref cs) => {
                if cs.is_empty() {
                    Derivatives {
                        d: Vec::new(),
                        rest: Empty,
                    }
                } else {
                    Derivatives {
                        d: vec![(sorted(cs), Null)],
                        rest: Empty,
                    }
                }
            }
            Alt(ref cs, ref xs) => {
                let mut ds = Vec::with_capacity(usize::from(!cs.is_empty()) + xs.len());
                if !cs.is_empty() {
                    ds.push(Derivatives {
                        d: vec![(sorted(cs), Empty)],
                        rest: Null,
                    });
                }
                ds.extend(xs.iter().map(Differentiable::derivative));
                combine(&ds, |regexes| {
                    Alt(Vec::new(), regexes.iter().map(|r| (*r).clone()).collect())
                })
            }
            And(ref xs) => {
                let ds: Vec<_> = xs.iter().map(Differentiable::derivative).collect();
                combine(&ds, |regexes| {
                    And(regexes.iter().map(|r| (*r).clone()).collect())
                })
            }
            Not(ref x) => x.derivative().map(|r| Not(Box::new(r))),
            Cat(ref xs) => {
                let mut ds = Vec::new();
                for (i, x) in xs.iter().enumerate() {
                    ds.push(x.derivative().map(|r| {
                        let mut v = vec![r];
                        v.extend_from_slice(&xs[i + 1..]);
                        Cat(v)
                    }));
                    if !x.nullable() {
                        break;
                    }
                }
                combine(&ds, |regexes| {
                    Alt(Vec::new(), regexes.iter().map(|r| (*r).clone()).collect())
                })
            }
            Kleene(ref x) => x
                .derivative()
                .map(|r| Cat(vec![r, Kleene(x.clone())])),
        }
    }
}

/// Character classes must be sorted and deduplicated for the merge iterators.
fn sorted(cs: &[char]) -> Vec<char> {
    let mut cs = cs.to_vec();
    cs.sort_unstable();
    cs.dedup();
    cs
}

// Derivatives of "regular vectors", as described in "Regular-expression derivatives reexamined" by Owens et al.
impl<R: Differentiable + Clone> Differentiable for Vec<R> {
    fn derivative(&self) -> Derivatives<Vec<R>> {
        let v: Vec<Derivatives<R>> = self.iter().map(Differentiable::derivative).collect();
        combine(&v, |xs: &[&R]| xs.iter().map(|&x| x.clone()).collect())
    }
}
