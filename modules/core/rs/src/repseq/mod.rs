pub use feature::{Anchor, Feature};
pub use landmark::Landmark;
pub use partitioning::Partitioning;

mod feature;
mod landmark;
mod partitioning;
