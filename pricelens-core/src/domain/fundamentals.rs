//! Best-effort company fundamentals.

use serde::{Deserialize, Serialize};

/// Optional fundamentals record supplied by a provider.
///
/// Every field may be absent. The engine never computes with these values;
/// they are carried into the report as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub sector: Option<String>,
}

impl Fundamentals {
    /// True if no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.market_cap.is_none()
            && self.trailing_pe.is_none()
            && self.trailing_eps.is_none()
            && self.sector.is_none()
    }
}
