use std::fmt::{Display, Formatter};

use eyre::{bail, Result};

/// Per-frame payload compression inside an alignment archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Algorithm {
    None,
    #[default]
    Deflate,
}

impl Algorithm {
    /// Wire tag stored in the archive header.
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Algorithm::None => 0,
            Algorithm::Deflate => 1,
        }
    }

    pub(crate) fn from_byte(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Algorithm::None),
            1 => Ok(Algorithm::Deflate),
            _ => bail!("Unknown archive compression algorithm tag: {}", tag),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::None => write!(f, "none"),
            Algorithm::Deflate => write!(f, "deflate"),
        }
    }
}
