//! Subsample definitions for the event panel.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten fixed segments of the rights-offering panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsample {
    /// Every offering
    Total,

    /// IBEX-35 constituents (`IBEX == 1`)
    Ibex,

    /// Main-market firms outside the IBEX-35 (`IBEX == 0`)
    MainMarket,

    /// Alternative-market (MAB) firms (`MAB == 1`)
    Alternative,

    /// Dilutive offerings (`DIL >= 0.5`)
    Dilutive,

    /// Non-dilutive offerings (`DIL < 0.5`)
    NonDilutive,

    /// Monetary offerings (`PRC != 1`)
    Monetary,

    /// Released offerings (`PRC == 0`)
    Released,

    /// Underwritten offerings (`INS == 1`)
    Insured,

    /// Offerings without underwriting (`INS == 0`)
    NonInsured,
}

impl Subsample {
    /// Returns all subsamples in table order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Total,
            Self::Ibex,
            Self::MainMarket,
            Self::Alternative,
            Self::Dilutive,
            Self::NonDilutive,
            Self::Monetary,
            Self::Released,
            Self::Insured,
            Self::NonInsured,
        ]
    }

    /// Row label used in the summary tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Total => "Total Sample",
            Self::Ibex => "IBEX",
            Self::MainMarket => "MC",
            Self::Alternative => "MAB",
            Self::Dilutive => "DIL >= 0.5",
            Self::NonDilutive => "DIL < 0.5",
            Self::Monetary => "MON = 1",
            Self::Released => "REL = 0",
            Self::Insured => "INS = 0",
            Self::NonInsured => "nINS = 0",
        }
    }

    /// Name of the matching long-term portfolio column.
    pub const fn portfolio(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Ibex => "IBEX",
            Self::MainMarket => "MC",
            Self::Alternative => "MAB",
            Self::Dilutive => "DIL",
            Self::NonDilutive => "nDIL",
            Self::Monetary => "MON",
            Self::Released => "REL",
            Self::Insured => "INS",
            Self::NonInsured => "nINS",
        }
    }

    /// Column the mask reads, if any.
    pub const fn column(&self) -> Option<&'static str> {
        match self {
            Self::Total => None,
            Self::Ibex | Self::MainMarket => Some("IBEX"),
            Self::Alternative => Some("MAB"),
            Self::Dilutive | Self::NonDilutive => Some("DIL"),
            Self::Monetary | Self::Released => Some("PRC"),
            Self::Insured | Self::NonInsured => Some("INS"),
        }
    }

    /// Boolean mask selecting the subsample, `None` for the full sample.
    ///
    /// Rows with a missing mask value are dropped, except for `PRC != 1`
    /// where a missing value compares as unequal and the row is kept.
    pub fn mask(&self) -> Option<Expr> {
        match self {
            Self::Total => None,
            Self::Ibex => Some(col("IBEX").eq(lit(1))),
            Self::MainMarket => Some(col("IBEX").eq(lit(0))),
            Self::Alternative => Some(col("MAB").eq(lit(1))),
            Self::Dilutive => Some(col("DIL").gt_eq(lit(0.5))),
            Self::NonDilutive => Some(col("DIL").lt(lit(0.5))),
            Self::Monetary => Some(col("PRC").neq_missing(lit(1))),
            Self::Released => Some(col("PRC").eq(lit(0))),
            Self::Insured => Some(col("INS").eq(lit(1))),
            Self::NonInsured => Some(col("INS").eq(lit(0))),
        }
    }
}

impl fmt::Display for Subsample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_subsamples() {
        let all = Subsample::all();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], Subsample::Total);
        assert_eq!(all[9], Subsample::NonInsured);
    }

    #[test]
    fn test_labels_match_published_rows() {
        let labels: Vec<_> = Subsample::all().iter().map(Subsample::label).collect();
        assert_eq!(
            labels,
            vec![
                "Total Sample",
                "IBEX",
                "MC",
                "MAB",
                "DIL >= 0.5",
                "DIL < 0.5",
                "MON = 1",
                "REL = 0",
                "INS = 0",
                "nINS = 0",
            ]
        );
    }

    #[test]
    fn test_mask_presence() {
        assert!(Subsample::Total.mask().is_none());
        assert!(Subsample::Total.column().is_none());
        for subsample in Subsample::all().into_iter().skip(1) {
            assert!(subsample.mask().is_some());
            assert!(subsample.column().is_some());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Subsample::Dilutive), "DIL >= 0.5");
        assert_eq!(Subsample::NonDilutive.portfolio(), "nDIL");
    }
}
