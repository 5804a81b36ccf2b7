use std::fmt::{Display, Formatter};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// Boundary points of the canonical receptor-gene layout, in 5' to 3' order.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Landmark {
    Utr5Begin,
    L1Begin,
    L1End,
    L2Begin,
    Fr1Begin,
    Cdr1Begin,
    Fr2Begin,
    Cdr2Begin,
    Fr3Begin,
    Cdr3Begin,
    Fr4Begin,
    Fr4End,
}

impl Landmark {
    pub const COUNT: usize = 12;

    /// All landmarks in layout order.
    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Utr5Begin,
        Landmark::L1Begin,
        Landmark::L1End,
        Landmark::L2Begin,
        Landmark::Fr1Begin,
        Landmark::Cdr1Begin,
        Landmark::Fr2Begin,
        Landmark::Cdr2Begin,
        Landmark::Fr3Begin,
        Landmark::Cdr3Begin,
        Landmark::Fr4Begin,
        Landmark::Fr4End,
    ];

    /// Dense index of the landmark, usable as an array offset.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Stable label used in reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Landmark::Utr5Begin => "UTR5Begin",
            Landmark::L1Begin => "L1Begin",
            Landmark::L1End => "L1End",
            Landmark::L2Begin => "L2Begin",
            Landmark::Fr1Begin => "FR1Begin",
            Landmark::Cdr1Begin => "CDR1Begin",
            Landmark::Fr2Begin => "FR2Begin",
            Landmark::Cdr2Begin => "CDR2Begin",
            Landmark::Fr3Begin => "FR3Begin",
            Landmark::Cdr3Begin => "CDR3Begin",
            Landmark::Fr4Begin => "FR4Begin",
            Landmark::Fr4End => "FR4End",
        }
    }
}

impl Display for Landmark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices() {
        for (ind, landmark) in Landmark::ALL.iter().enumerate() {
            assert_eq!(landmark.index(), ind);
        }
        assert_eq!(Landmark::ALL.len(), Landmark::COUNT);
    }

    #[test]
    fn test_landmark_labels() {
        assert_eq!(Landmark::Utr5Begin.to_string(), "UTR5Begin");
        assert_eq!(Landmark::Cdr3Begin.to_string(), "CDR3Begin");
        assert_eq!(Landmark::Fr4End.to_string(), "FR4End");
    }
}
