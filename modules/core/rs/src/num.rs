use std::fmt::Debug;

/// Marker for primitive integer types usable as coordinates across the workspace.
pub trait Coord: ::num::PrimInt + Debug + Default + Send + Sync {}

impl<T: ::num::PrimInt + Debug + Default + Send + Sync> Coord for T {}
