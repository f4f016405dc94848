#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image enhancement module.
pub mod enhance;

/// compute image histogram module.
pub mod histogram;

/// binary morphology module.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;

/// image border padding module.
pub mod padding;

/// operations to threshold images.
pub mod threshold;
