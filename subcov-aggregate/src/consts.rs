use crate::strategy::{EndPolicy, Strategy};

pub const DEFAULT_CUTOFF: f64 = 100.0;
pub const DEFAULT_STRATEGY: Strategy = Strategy::Gene;
pub const DEFAULT_END_POLICY: EndPolicy = EndPolicy::LastExonStart;

/// Gene percentages are reported to this many decimal places.
pub const PERCENTAGE_DECIMALS: i32 = 2;
