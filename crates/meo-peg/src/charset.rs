//! Character classes for `set` and `range` expressions.

use std::fmt;

/// A set of characters.
///
/// ASCII membership is a single bit test; everything else is an inclusive
/// range scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    ascii: u128,
    ranges: Vec<(char, char)>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing every character of `chars`.
    pub fn from_chars(chars: &str) -> Self {
        let mut set = Self::new();
        for ch in chars.chars() {
            set.insert(ch);
        }
        set
    }

    /// Set containing `min..=max`. Empty when `min > max`.
    pub fn from_range(min: char, max: char) -> Self {
        let mut set = Self::new();
        set.insert_range(min, max);
        set
    }

    pub fn insert(&mut self, ch: char) {
        self.insert_range(ch, ch);
    }

    pub fn insert_range(&mut self, min: char, max: char) {
        if min > max {
            return;
        }
        let (lo, hi) = (min as u32, max as u32);
        for code in lo..=hi.min(127) {
            self.ascii |= 1u128 << code;
        }
        if hi >= 128 {
            let start = char::from_u32(lo.max(128)).unwrap_or('\u{80}');
            self.ranges.push((start, max));
        }
    }

    /// Union with another set.
    pub fn extend(&mut self, other: &CharSet) {
        self.ascii |= other.ascii;
        self.ranges.extend_from_slice(&other.ranges);
    }

    pub fn contains(&self, ch: char) -> bool {
        let code = ch as u32;
        if code < 128 {
            return self.ascii & (1u128 << code) != 0;
        }
        self.ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi)
    }

    pub fn is_empty(&self) -> bool {
        self.ascii == 0 && self.ranges.is_empty()
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut code = 0u32;
        while code < 128 {
            if self.ascii & (1u128 << code) == 0 {
                code += 1;
                continue;
            }
            let start = code;
            while code + 1 < 128 && self.ascii & (1u128 << (code + 1)) != 0 {
                code += 1;
            }
            write_class_range(f, start, code)?;
            code += 1;
        }
        for &(lo, hi) in &self.ranges {
            write_class_range(f, lo as u32, hi as u32)?;
        }
        f.write_str("]")
    }
}

fn write_class_range(f: &mut fmt::Formatter<'_>, lo: u32, hi: u32) -> fmt::Result {
    let show = |code: u32| {
        let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        match ch {
            ']' | '\\' | '-' | '^' => format!("\\{ch}"),
            ch => ch.escape_debug().to_string(),
        }
    };
    match hi - lo {
        0 => write!(f, "{}", show(lo)),
        1 => write!(f, "{}{}", show(lo), show(hi)),
        _ => write!(f, "{}-{}", show(lo), show(hi)),
    }
}
