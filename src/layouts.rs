use fastrand::Rng;
use std::collections::HashSet;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A candidate key assignment. Slot `i` maps onto the `i`-th key of the
/// keyboard's canonical ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    pub name: String,
    pub chars: Vec<char>,
}

impl Layout {
    pub fn new(name: impl Into<String>, chars: Vec<char>) -> Self {
        Self {
            name: name.into(),
            chars,
        }
    }

    pub fn from_letters(name: impl Into<String>, s: &str) -> Self {
        Self::new(name, s.chars().collect())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Character set in sorted order.
    pub fn charset(&self) -> Vec<char> {
        let mut set = self.chars.clone();
        set.sort_unstable();
        set
    }

    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.chars.len());
        !self.chars.iter().all(|c| seen.insert(*c))
    }

    /// True when `self` is a duplicate-free rearrangement of `other`.
    pub fn is_permutation_of(&self, other: &Layout) -> bool {
        self.len() == other.len() && !self.has_duplicates() && self.charset() == other.charset()
    }

    /// Uniform shuffle of this layout's characters.
    pub fn shuffled(&self, name: impl Into<String>, rng: &mut Rng) -> Layout {
        let mut chars = self.chars.clone();
        rng.shuffle(&mut chars);
        Layout::new(name, chars)
    }

    /// Copy with positions `a` and `b` exchanged.
    pub fn with_swap(&self, a: usize, b: usize) -> Layout {
        let mut chars = self.chars.clone();
        chars.swap(a, b);
        Layout::new(self.name.clone(), chars)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.as_string())
    }
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Dvorak,
    Colemak,
    ColemakDh,
    Workman,
    Norman,
    Qwertz,
    Azerty,
    Halmak,
    Canary,
    Mtgap,
}

impl KnownLayout {
    /// Letters only, read row by row (top, home, bottom).
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjklzxcvbnm",
            Self::Dvorak => "pyfgcrlaoeuidhtnsqjkxbmwvz",
            Self::Colemak => "qwfpgjluyarstdhneiozxcvbkm",
            Self::ColemakDh => "qwfpbjluyarstgmneiozxcdvkh",
            Self::Workman => "qdrwbjfupashtgyneoizxmcvkl",
            Self::Norman => "qwdfkjurlasetgyniohzxcvbpm",
            Self::Qwertz => "qwertzuiopasdfghjklyxcvbnm",
            Self::Azerty => "azertyuiopqsdfghjklmwxcvbn",
            Self::Halmak => "wlrbzqudjshntaeoifmvcgpxky",
            Self::Canary => "wlypkzxoucrstbfneiaqjvdgmh",
            Self::Mtgap => "ypoujkdlcwineamhtsrqzxfbgv",
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::from_letters(self.to_string(), self.get_str())
    }
}

pub fn all_layouts() -> Vec<Layout> {
    KnownLayout::iter().map(|l| l.layout()).collect()
}
