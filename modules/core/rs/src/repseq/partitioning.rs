#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

use super::feature::Anchor;
use super::landmark::Landmark;

/// Positions of receptor-gene landmarks inside one aligned read.
///
/// Landmarks that the upstream aligner could not resolve for the read are
/// simply absent; downstream consumers treat them as non-contributing.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Partitioning {
    positions: [Option<u32>; Landmark::COUNT],
}

impl Partitioning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, landmark: Landmark, pos: u32) -> &mut Self {
        self.positions[landmark.index()] = Some(pos);
        self
    }

    #[inline(always)]
    pub fn get(&self, landmark: Landmark) -> Option<u32> {
        self.positions[landmark.index()]
    }

    /// Read-coordinate position of an anchor. The shift may push the position
    /// below zero; callers clip against the aligned spans.
    pub fn locate(&self, anchor: Anchor) -> Option<i64> {
        self.get(anchor.landmark)
            .map(|pos| pos as i64 + anchor.shift as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }
}

impl FromIterator<(Landmark, u32)> for Partitioning {
    fn from_iter<T: IntoIterator<Item = (Landmark, u32)>>(iter: T) -> Self {
        let mut partitioning = Self::new();
        for (landmark, pos) in iter {
            partitioning.set(landmark, pos);
        }
        partitioning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitioning_lookup() {
        let mut partitioning = Partitioning::new();
        assert!(partitioning.is_empty());
        assert_eq!(partitioning.get(Landmark::Cdr3Begin), None);

        partitioning.set(Landmark::Cdr3Begin, 100);
        assert!(!partitioning.is_empty());
        assert_eq!(partitioning.get(Landmark::Cdr3Begin), Some(100));
        assert_eq!(partitioning.get(Landmark::Fr4Begin), None);
    }

    #[test]
    fn test_locate_applies_shift() {
        let partitioning: Partitioning = [(Landmark::L1Begin, 10u32)].into_iter().collect();

        assert_eq!(
            partitioning.locate(Anchor::new(Landmark::L1Begin, 0)),
            Some(10)
        );
        assert_eq!(
            partitioning.locate(Anchor::new(Landmark::L1Begin, -20)),
            Some(-10)
        );
        assert_eq!(partitioning.locate(Anchor::new(Landmark::L1End, 0)), None);
    }
}
