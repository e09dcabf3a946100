//! Bounded enumeration of binary strings.

/// Longest string [`binary_strings`] produces; a larger `max_len` is
/// treated as this.
pub const MAX_LEN: usize = u64::BITS as usize - 1;

/// Every binary string of length `1..=max_len`: shorter strings first, and
/// within one length in ascending numeric order, zero padded to that length.
///
/// ```
/// let all: Vec<String> = dfagame::strings::binary_strings(2).collect();
/// assert_eq!(all, ["0", "1", "00", "01", "10", "11"]);
/// ```
pub fn binary_strings(max_len: usize) -> BinaryStrings {
    BinaryStrings {
        max_len: max_len.min(MAX_LEN),
        len: 1,
        value: 0,
    }
}

#[derive(Debug, Clone)]
pub struct BinaryStrings {
    max_len: usize,
    len: usize,
    value: u64,
}

impl BinaryStrings {
    fn remaining(&self) -> Option<usize> {
        if self.len > self.max_len {
            return Some(0);
        }
        let mut total: usize = 0;
        for len in self.len..=self.max_len {
            let count = 1usize.checked_shl(len as u32)?;
            total = total.checked_add(count)?;
        }
        total.checked_sub(self.value as usize)
    }
}

impl Iterator for BinaryStrings {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.len > self.max_len {
            return None;
        }
        let s = format!("{:0width$b}", self.value, width = self.len);
        self.value += 1;
        if self.value == 1u64 << self.len {
            self.value = 0;
            self.len += 1;
        }
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            // more than fits in a usize
            None => (usize::MAX, None),
        }
    }
}
