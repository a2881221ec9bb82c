use crate::consts::{ALPHABET, BLANK, POSITION_COUNT, ROW_WIDTH};
use crate::constraints::ConstraintSet;
use crate::error::{KeysolveError, KsResult};
use crate::geometry::Pos;
use crate::metrics::Key;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Candidate positions for one letter, as a bitmask over the 30 grid
/// indices. Iteration is always in ascending index order, which keeps
/// seeded runs reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosSet(u32);

impl PosSet {
    pub const EMPTY: PosSet = PosSet(0);
    pub const FULL: PosSet = PosSet((1 << POSITION_COUNT) - 1);

    pub fn singleton(index: u8) -> Self {
        PosSet(1 << index)
    }

    pub fn insert(&mut self, index: u8) {
        self.0 |= 1 << index;
    }

    pub fn remove(&mut self, index: u8) {
        self.0 &= !(1 << index);
    }

    pub fn contains(&self, index: u8) -> bool {
        self.0 & (1 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The sole member, if the set is a singleton.
    pub fn single(&self) -> Option<Pos> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..POSITION_COUNT).filter(|i| self.contains(*i as u8)).map(Pos::new)
    }
}

impl FromIterator<u8> for PosSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = PosSet::EMPTY;
        for index in iter {
            set.insert(index);
        }
        set
    }
}

/// The outcome of selecting a letter: either a concrete position, or
/// `None` when the letter's candidate set was already empty. Either way
/// the letter is retired from the unplaced pool and never revisited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub letter: char,
    pub pos: Option<Pos>,
}

/// Solver state: one shrinking candidate set per letter of the alphabet.
///
/// Candidate sets only ever shrink under `place`; `swap` is the single
/// post-hoc mutation and deliberately skips re-propagation. `Clone` is a
/// deep copy of all mutable state (the constraint set itself is immutable
/// and shared).
#[derive(Debug, Clone)]
pub struct Layout {
    pub name: Option<String>,
    pub author: Option<String>,
    pub modified: bool,
    constraints: Arc<ConstraintSet>,
    options: BTreeMap<char, PosSet>,
    unplaced: BTreeSet<char>,
}

impl Layout {
    /// A fresh layout with every letter unplaced and its candidate set
    /// filtered through the monogram rules.
    pub fn new(constraints: Arc<ConstraintSet>) -> Self {
        let mut options = BTreeMap::new();
        for c in ALPHABET.chars() {
            let set: PosSet = Pos::all()
                .filter(|&pos| constraints.allows_position(&Key::new(c, pos)))
                .map(|pos| pos.index)
                .collect();
            options.insert(c, set);
        }

        Self {
            name: None,
            author: None,
            modified: false,
            constraints,
            options,
            unplaced: ALPHABET.chars().collect(),
        }
    }

    /// A fully-committed layout seeded from a 30-character catalog string.
    /// `~` cells stay unassigned; their letters remain unplaced.
    pub fn seeded(constraints: Arc<ConstraintSet>, name: Option<&str>, chars: &str) -> KsResult<Self> {
        crate::layouts::validate_layout_string(chars)?;

        let mut layout = Layout::new(constraints);
        layout.name = name.map(str::to_owned);
        for (i, c) in chars.chars().enumerate() {
            if c != BLANK {
                layout.options.insert(c, PosSet::singleton(i as u8));
                layout.unplaced.remove(&c);
            }
        }
        Ok(layout)
    }

    /// `name (Mod)` once swapped, `Untitled` when anonymous.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if self.modified => format!("{} (Mod)", name),
            Some(name) => name.clone(),
            None => "Untitled".to_string(),
        }
    }

    pub fn display_author(&self) -> String {
        self.author.clone().unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn candidates(&self, letter: char) -> PosSet {
        self.options.get(&letter).copied().unwrap_or(PosSet::EMPTY)
    }

    pub fn is_unplaced(&self, letter: char) -> bool {
        self.unplaced.contains(&letter)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Unplaced letters whose candidate sets are smallest, ties included,
    /// in alphabet order.
    pub fn least_constrained(&self) -> Vec<char> {
        let mut min: Option<usize> = None;
        let mut letters = Vec::new();

        for &c in &self.unplaced {
            let len = self.options[&c].len();
            match min {
                Some(m) if len > m => {}
                Some(m) if len == m => letters.push(c),
                _ => {
                    min = Some(len);
                    letters.clear();
                    letters.push(c);
                }
            }
        }

        letters
    }

    /// Picks a uniform letter from `candidates` and a uniform position from
    /// its candidate set. An empty set yields a positionless placement.
    pub fn find_choice(&self, candidates: &[char], rng: &mut fastrand::Rng) -> Placement {
        let letter = candidates[rng.usize(..candidates.len())];
        let set = self.candidates(letter);
        let pos = if set.is_empty() {
            None
        } else {
            set.iter().nth(rng.usize(..set.len()))
        };
        Placement { letter, pos }
    }

    /// Commits a placement and forward-checks every still-unplaced letter:
    /// the committed position and every position failing a bigram rule
    /// against the committed key are pruned. A positionless placement only
    /// retires the letter.
    pub fn place(&mut self, placement: &Placement) {
        if let Some(pos) = placement.pos {
            let committed = Key::new(placement.letter, pos);

            for &c in &self.unplaced {
                let set = self.options[&c];
                let mut pruned = set;

                for p in set.iter() {
                    let candidate = Key::new(c, p);
                    if p.index == pos.index
                        || !self.constraints.allows_adjacent(&candidate, &committed)
                    {
                        pruned.remove(p.index);
                    }
                }

                self.options.insert(c, pruned);
            }

            self.options.insert(placement.letter, PosSet::singleton(pos.index));
        }

        self.unplaced.remove(&placement.letter);
    }

    pub fn place_key(&mut self, key: Key) {
        self.place(&Placement {
            letter: key.c,
            pos: Some(key.pos),
        });
    }

    /// Exchanges two letters' candidate sets without re-propagating.
    pub fn swap(&mut self, a: char, b: char) -> KsResult<()> {
        let set_a = *self.options.get(&a).ok_or_else(|| {
            KeysolveError::Validation(format!("Cannot swap unknown letter '{}'", a))
        })?;
        let set_b = *self.options.get(&b).ok_or_else(|| {
            KeysolveError::Validation(format!("Cannot swap unknown letter '{}'", b))
        })?;

        self.options.insert(a, set_b);
        self.options.insert(b, set_a);
        self.modified = true;
        Ok(())
    }

    /// Committed letters only: placed, with a singleton candidate set.
    pub fn keymap(&self) -> BTreeMap<char, Key> {
        let mut map = BTreeMap::new();
        for (&c, set) in &self.options {
            if self.unplaced.contains(&c) {
                continue;
            }
            if let Some(pos) = set.single() {
                map.insert(c, Key::new(c, pos));
            }
        }
        map
    }

    /// Letters whose candidate set is not a committed singleton.
    pub fn unresolved_count(&self) -> usize {
        ALPHABET
            .chars()
            .filter(|&c| self.candidates(c).len() != 1)
            .count()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = [BLANK; POSITION_COUNT];
        for key in self.keymap().values() {
            cells[key.pos.index as usize] = key.c;
        }

        for (i, row) in cells.chunks(ROW_WIDTH).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row.iter().map(char::to_string).collect::<Vec<_>>().join(" ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
