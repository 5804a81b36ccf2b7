use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use repkit_core_rs::repseq::{Feature, Landmark};

/// Default margins around an anchor point, in nucleotides.
pub const DEFAULT_MARGIN: u32 = 40;

/// Anchor-point descriptor: a landmark with left/right coverage margins.
#[derive(Constructor, Clone, Copy, PartialEq, Eq, Hash, Debug, Getters)]
pub struct Window {
    landmark: Landmark,
    left: u32,
    right: u32,
}

impl Window {
    pub fn around(landmark: Landmark) -> Self {
        Self::new(landmark, DEFAULT_MARGIN, DEFAULT_MARGIN)
    }
}

impl From<Landmark> for Window {
    fn from(landmark: Landmark) -> Self {
        Window::around(landmark)
    }
}

/// The fixed set of analysis targets for one run: regions first, then anchor
/// points. The order is the report order. Pure data, immutable once built.
#[derive(Constructor, Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Targets {
    features: Vec<Feature>,
    anchors: Vec<Window>,
}

impl Targets {
    /// The built-in analysis table.
    pub fn standard() -> Self {
        let features = vec![
            Feature::V5UTR,
            Feature::at(Landmark::L1Begin, -20, 0),
            Feature::L1,
            Feature::V_INTRON,
            Feature::L2,
            Feature::FR1,
            Feature::CDR1,
            Feature::FR2,
            Feature::CDR2,
            Feature::FR3,
            Feature::CDR3,
            Feature::FR4,
            Feature::FR4.with_shifts(0, -3),
        ];
        let anchors = [
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
        ]
        .into_iter()
        .map(Window::around)
        .collect();

        Self::new(features, anchors)
    }

    pub fn len(&self) -> usize {
        self.features.len() + self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.anchors.is_empty()
    }
}
