use crate::geometry::Pos;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// A letter committed to a physical position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub c: char,
    pub pos: Pos,
}

impl Key {
    pub fn new(c: char, pos: Pos) -> Self {
        Self { c, pos }
    }
}

/// Rolling direction of the `a -> b` motion.
///
/// 0 is inward (toward the index fingers), 1 is outward. -1 means the
/// motion has no direction: a hand change or a same-finger repeat.
#[inline(always)]
pub fn direction(a: &Key, b: &Key) -> i8 {
    if a.pos.hand != b.pos.hand {
        return -1;
    }
    if a.pos.finger < b.pos.finger {
        a.pos.hand as i8
    } else if a.pos.finger > b.pos.finger {
        1 - a.pos.hand as i8
    } else {
        -1
    }
}

#[inline(always)]
pub fn same_finger(a: &Key, b: &Key) -> bool {
    a.pos.finger == b.pos.finger && a.pos.index != b.pos.index
}

#[inline(always)]
pub fn lateral(a: &Key, b: &Key) -> bool {
    a.pos.hand == b.pos.hand
        && a.pos.finger.abs_diff(b.pos.finger) == 1
        && a.pos.col.abs_diff(b.pos.col) == 2
}

// Scissors key off the finger holding the LOWER of the two keys.
const SCISSOR_FINGERS: [u8; 4] = [1, 2, 7, 8];

#[inline(always)]
fn lower_finger(a: &Key, b: &Key) -> u8 {
    if a.pos.row > b.pos.row {
        a.pos.finger
    } else {
        b.pos.finger
    }
}

#[inline(always)]
pub fn hscissor(a: &Key, b: &Key) -> bool {
    a.pos.hand == b.pos.hand
        && a.pos.finger != b.pos.finger
        && a.pos.row.abs_diff(b.pos.row) == 1
        && SCISSOR_FINGERS.contains(&lower_finger(a, b))
}

#[inline(always)]
pub fn fscissor(a: &Key, b: &Key) -> bool {
    a.pos.hand == b.pos.hand
        && a.pos.finger != b.pos.finger
        && a.pos.row.abs_diff(b.pos.row) == 2
        && SCISSOR_FINGERS.contains(&lower_finger(a, b))
}

#[inline(always)]
pub fn alternate(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand != b.pos.hand && b.pos.hand != c.pos.hand
}

#[inline(always)]
pub fn roll(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand != c.pos.hand && a.pos.finger != b.pos.finger && b.pos.finger != c.pos.finger
}

#[inline(always)]
pub fn inroll(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand != c.pos.hand && (direction(a, b) == 0 || direction(b, c) == 0)
}

#[inline(always)]
pub fn outroll(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand != c.pos.hand && (direction(a, b) == 1 || direction(b, c) == 1)
}

#[inline(always)]
pub fn redirect(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand == b.pos.hand
        && b.pos.hand == c.pos.hand
        && a.pos.finger != b.pos.finger
        && b.pos.finger != c.pos.finger
        && direction(a, b) != direction(b, c)
}

#[inline(always)]
pub fn onehand(a: &Key, b: &Key, c: &Key) -> bool {
    a.pos.hand == b.pos.hand
        && b.pos.hand == c.pos.hand
        && a.pos.finger != b.pos.finger
        && b.pos.finger != c.pos.finger
        && direction(a, b) == direction(b, c)
}

/// N-gram corpus class a metric is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum NgramClass {
    Monograms,
    Bigrams,
    Skipgrams,
    Trigrams,
}

impl NgramClass {
    pub fn gram_len(&self) -> usize {
        match self {
            NgramClass::Monograms => 1,
            NgramClass::Bigrams | NgramClass::Skipgrams => 2,
            NgramClass::Trigrams => 3,
        }
    }
}

/// A metric predicate tagged by arity. Skipgram metrics are binary
/// predicates applied to the outer keys of a three-letter window.
#[derive(Clone, Copy)]
pub enum Metric {
    Unary(fn(&Key) -> bool),
    Binary(fn(&Key, &Key) -> bool),
    Ternary(fn(&Key, &Key, &Key) -> bool),
}

impl Metric {
    pub fn arity(&self) -> usize {
        match self {
            Metric::Unary(_) => 1,
            Metric::Binary(_) => 2,
            Metric::Ternary(_) => 3,
        }
    }

    pub fn matches(&self, keys: &[Key]) -> bool {
        match self {
            Metric::Unary(f) => f(&keys[0]),
            Metric::Binary(f) => f(&keys[0], &keys[1]),
            Metric::Ternary(f) => f(&keys[0], &keys[1], &keys[2]),
        }
    }
}

pub struct MetricDef {
    pub name: &'static str,
    pub class: NgramClass,
    pub metric: Metric,
    pub positive: bool,
}

/// The canonical metric table, in report-card order.
pub const METRICS: [MetricDef; 14] = [
    MetricDef {
        name: "sfb",
        class: NgramClass::Bigrams,
        metric: Metric::Binary(same_finger),
        positive: false,
    },
    MetricDef {
        name: "lsb",
        class: NgramClass::Bigrams,
        metric: Metric::Binary(lateral),
        positive: false,
    },
    MetricDef {
        name: "hsb",
        class: NgramClass::Bigrams,
        metric: Metric::Binary(hscissor),
        positive: false,
    },
    MetricDef {
        name: "fsb",
        class: NgramClass::Bigrams,
        metric: Metric::Binary(fscissor),
        positive: false,
    },
    MetricDef {
        name: "sfs",
        class: NgramClass::Skipgrams,
        metric: Metric::Binary(same_finger),
        positive: false,
    },
    MetricDef {
        name: "lss",
        class: NgramClass::Skipgrams,
        metric: Metric::Binary(lateral),
        positive: false,
    },
    MetricDef {
        name: "hss",
        class: NgramClass::Skipgrams,
        metric: Metric::Binary(hscissor),
        positive: false,
    },
    MetricDef {
        name: "fss",
        class: NgramClass::Skipgrams,
        metric: Metric::Binary(fscissor),
        positive: false,
    },
    MetricDef {
        name: "alternate",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(alternate),
        positive: false,
    },
    MetricDef {
        name: "roll",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(roll),
        positive: true,
    },
    MetricDef {
        name: "redirect",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(redirect),
        positive: false,
    },
    MetricDef {
        name: "onehand",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(onehand),
        positive: true,
    },
    MetricDef {
        name: "inroll",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(inroll),
        positive: true,
    },
    MetricDef {
        name: "outroll",
        class: NgramClass::Trigrams,
        metric: Metric::Ternary(outroll),
        positive: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pos;

    fn key(index: usize) -> Key {
        Key::new('a', Pos::new(index))
    }

    #[test]
    fn direction_cross_hand_is_undirected() {
        assert_eq!(direction(&key(0), &key(9)), -1);
    }

    #[test]
    fn direction_inward_and_outward() {
        // Left hand, pinky to ring: inward on hand 0.
        assert_eq!(direction(&key(0), &key(1)), 0);
        assert_eq!(direction(&key(1), &key(0)), 1);
        // Right hand mirrors.
        assert_eq!(direction(&key(9), &key(8)), 0);
        assert_eq!(direction(&key(8), &key(9)), 1);
    }

    #[test]
    fn same_finger_excludes_repeat_position() {
        assert!(same_finger(&key(3), &key(4)));
        assert!(!same_finger(&key(3), &key(3)));
        assert!(!same_finger(&key(2), &key(3)));
    }

    #[test]
    fn lateral_needs_adjacent_finger_two_columns() {
        // cols 2 and 4: fingers 2 and 3, two columns apart.
        assert!(lateral(&key(2), &key(4)));
        // cols 2 and 3: one column apart.
        assert!(!lateral(&key(2), &key(3)));
        // cols 4 and 6: two columns apart but on different hands.
        assert!(!lateral(&key(4), &key(6)));
    }

    #[test]
    fn scissors_look_at_the_lower_key() {
        // index 1 (row 0, finger 1) over index 12 (row 1, finger 2):
        // lower key finger 2 is a scissor finger.
        assert!(hscissor(&key(1), &key(12)));
        // index 0 over index 11: lower finger 1, upper finger 0.
        assert!(hscissor(&key(0), &key(11)));
        // index 1 over index 10: lower key on finger 0, not a scissor.
        assert!(!hscissor(&key(1), &key(10)));
        // Full scissor spans two rows.
        assert!(fscissor(&key(1), &key(22)));
        assert!(!fscissor(&key(1), &key(12)));
    }

    #[test]
    fn trigram_predicates() {
        let (l0, l1, r0) = (key(0), key(1), key(9));
        assert!(alternate(&l0, &r0, &l1));
        assert!(!alternate(&l0, &l1, &r0));
        assert!(roll(&l0, &l1, &r0));
        assert!(inroll(&l0, &l1, &r0));
        assert!(!outroll(&l0, &l1, &r0));
        assert!(outroll(&l1, &l0, &r0));
    }

    #[test]
    fn onehand_and_redirect_split_same_hand_runs() {
        let (a, b, c) = (key(0), key(1), key(2));
        assert!(onehand(&a, &b, &c));
        assert!(!redirect(&a, &b, &c));
        let (a, b, c) = (key(0), key(2), key(1));
        assert!(redirect(&a, &b, &c));
        assert!(!onehand(&a, &b, &c));
    }

    #[test]
    fn table_order_and_positive_set() {
        let names: Vec<_> = METRICS.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            [
                "sfb", "lsb", "hsb", "fsb", "sfs", "lss", "hss", "fss", "alternate", "roll",
                "redirect", "onehand", "inroll", "outroll"
            ]
        );
        let positive: Vec<_> = METRICS.iter().filter(|m| m.positive).map(|m| m.name).collect();
        assert_eq!(positive, ["roll", "onehand", "inroll"]);
    }
}
