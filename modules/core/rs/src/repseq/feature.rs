use std::fmt::{Display, Formatter};

use derive_more::Constructor;

use super::landmark::Landmark;

/// A landmark displaced by a signed offset, in read coordinates.
#[derive(Constructor, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Anchor {
    pub landmark: Landmark,
    pub shift: i32,
}

impl From<Landmark> for Anchor {
    fn from(landmark: Landmark) -> Self {
        Anchor::new(landmark, 0)
    }
}

/// A region of the receptor gene delimited by two anchors.
///
/// Canonical regions (FR1, CDR3, ...) are provided as constants; trimmed or
/// point-anchored variants are derived with [`Feature::with_shifts`] and
/// [`Feature::at`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Feature {
    start: Anchor,
    end: Anchor,
}

/// Canonical region names, keyed by their delimiting landmarks.
const NAMED: &[(Landmark, Landmark, &str)] = &[
    (Landmark::Utr5Begin, Landmark::L1Begin, "V5UTR"),
    (Landmark::L1Begin, Landmark::L1End, "L1"),
    (Landmark::L1End, Landmark::L2Begin, "VIntron"),
    (Landmark::L2Begin, Landmark::Fr1Begin, "L2"),
    (Landmark::Fr1Begin, Landmark::Cdr1Begin, "FR1"),
    (Landmark::Cdr1Begin, Landmark::Fr2Begin, "CDR1"),
    (Landmark::Fr2Begin, Landmark::Cdr2Begin, "FR2"),
    (Landmark::Cdr2Begin, Landmark::Fr3Begin, "CDR2"),
    (Landmark::Fr3Begin, Landmark::Cdr3Begin, "FR3"),
    (Landmark::Cdr3Begin, Landmark::Fr4Begin, "CDR3"),
    (Landmark::Fr4Begin, Landmark::Fr4End, "FR4"),
];

impl Feature {
    pub const V5UTR: Feature = Feature::spanning(Landmark::Utr5Begin, Landmark::L1Begin);
    pub const L1: Feature = Feature::spanning(Landmark::L1Begin, Landmark::L1End);
    pub const V_INTRON: Feature = Feature::spanning(Landmark::L1End, Landmark::L2Begin);
    pub const L2: Feature = Feature::spanning(Landmark::L2Begin, Landmark::Fr1Begin);
    pub const FR1: Feature = Feature::spanning(Landmark::Fr1Begin, Landmark::Cdr1Begin);
    pub const CDR1: Feature = Feature::spanning(Landmark::Cdr1Begin, Landmark::Fr2Begin);
    pub const FR2: Feature = Feature::spanning(Landmark::Fr2Begin, Landmark::Cdr2Begin);
    pub const CDR2: Feature = Feature::spanning(Landmark::Cdr2Begin, Landmark::Fr3Begin);
    pub const FR3: Feature = Feature::spanning(Landmark::Fr3Begin, Landmark::Cdr3Begin);
    pub const CDR3: Feature = Feature::spanning(Landmark::Cdr3Begin, Landmark::Fr4Begin);
    pub const FR4: Feature = Feature::spanning(Landmark::Fr4Begin, Landmark::Fr4End);

    /// Region between two landmarks, no trimming.
    pub const fn spanning(start: Landmark, end: Landmark) -> Self {
        Self {
            start: Anchor {
                landmark: start,
                shift: 0,
            },
            end: Anchor {
                landmark: end,
                shift: 0,
            },
        }
    }

    /// Region anchored at a single landmark, covering [from, to) around it.
    pub const fn at(landmark: Landmark, from: i32, to: i32) -> Self {
        Self {
            start: Anchor {
                landmark,
                shift: from,
            },
            end: Anchor { landmark, shift: to },
        }
    }

    /// Shift both boundaries of the region, e.g. to trim codons off its ends.
    pub const fn with_shifts(mut self, start: i32, end: i32) -> Self {
        self.start.shift += start;
        self.end.shift += end;
        self
    }

    #[inline(always)]
    pub fn start(&self) -> Anchor {
        self.start
    }

    #[inline(always)]
    pub fn end(&self) -> Anchor {
        self.end
    }

    fn canonical_name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(start, end, _)| *start == self.start.landmark && *end == self.end.landmark)
            .map(|(_, _, name)| *name)
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.canonical_name(), self.start.shift, self.end.shift) {
            (Some(name), 0, 0) => write!(f, "{}", name),
            (Some(name), s, e) => write!(f, "{}[{}:{}]", name, s, e),
            (None, s, e) if self.start.landmark == self.end.landmark => {
                write!(f, "{}[{}:{}]", self.start.landmark, s, e)
            }
            (None, s, e) => write!(
                f,
                "{}[{}]:{}[{}]",
                self.start.landmark, s, self.end.landmark, e
            ),
        }
    }
}
