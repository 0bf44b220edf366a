//! Domain types for PriceLens

pub mod align;
pub mod bar;
pub mod fundamentals;
pub mod series;

pub use align::{align_common, AlignedPair};
pub use bar::Bar;
pub use fundamentals::Fundamentals;
pub use series::{DerivedSeries, PriceSeries};
