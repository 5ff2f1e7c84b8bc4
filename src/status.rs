use crate::view::ComputedMonth;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusVariant {
    Success,
    Warning,
    Destructive,
    Neutral,
}

/// What a month's balance means for billing. Label text lives in
/// [`presentation`](crate::presentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    PaymentDue,
    UnusedHours,
    OnBudget,
    CarriesOver,
    DeductedNextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusTag {
    pub kind: StatusKind,
    pub variant: StatusVariant,
}

impl StatusTag {
    const fn new(kind: StatusKind, variant: StatusVariant) -> Self {
        Self { kind, variant }
    }
}

/// Rules are checked in priority order; settlement outcomes win over the
/// mid-cycle balance.
pub fn derive_status(month: &ComputedMonth) -> StatusTag {
    use StatusKind::*;
    use StatusVariant::*;

    if month.settles {
        if month.extra_minutes > 0 {
            return StatusTag::new(PaymentDue, Destructive);
        }
        if month.unused_minutes > 0 {
            return StatusTag::new(UnusedHours, Warning);
        }
        return StatusTag::new(OnBudget, Success);
    }
    if month.end_balance > 0 {
        StatusTag::new(CarriesOver, Success)
    } else if month.end_balance < 0 {
        StatusTag::new(DeductedNextMonth, Destructive)
    } else {
        StatusTag::new(OnBudget, Neutral)
    }
}
