//! Statistics aggregation.
//!
//! The aggregator provides the generic accumulators, the tally counts
//! world classes, and the surveys drive one pass per record collection.

pub mod aggregator;
pub mod survey;
pub mod tally;

pub use aggregator::*;
pub use survey::*;
pub use tally::*;
