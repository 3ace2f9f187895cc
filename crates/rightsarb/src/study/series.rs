//! Event-panel series analysed by the study.

use rightsarb_stats::{BootstrapConfig, StatsConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrage return series and their outlier flag columns, in table order.
const ARBITRAGE: [(&str, &str); 12] = [
    ("RET1", "OUT1"),
    ("N01", "OUN1"),
    ("N02", "OUN2"),
    ("N03", "OUN3"),
    ("N04", "OUN4"),
    ("N05", "OUN5"),
    ("N06", "OUN6"),
    ("N07", "OUN7"),
    ("N08", "OUN8"),
    ("N09", "OUN9"),
    ("N10", "OUN10"),
    ("RET2", "OUT2"),
];

/// Short-term abnormal return windows around the offering calendar.
const EVENTS: [&str; 6] = ["ANN", "MET", "STR", "END", "RES", "TRD"];

/// How a series is summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Arbitrage returns: flagged outliers dropped, no bootstrap
    Arbitrage,

    /// Short-term event returns: every offering kept, bootstrap interval
    Event,
}

impl SeriesKind {
    /// Whether offerings with a non-zero outlier flag are excluded.
    pub const fn exclude_outliers(&self) -> bool {
        matches!(self, Self::Arbitrage)
    }

    /// Whether the bootstrap interval is computed.
    pub const fn bootstrap_enabled(&self) -> bool {
        matches!(self, Self::Event)
    }

    /// Statistics settings for this kind of series.
    pub fn stats_config(&self, bootstrap: &BootstrapConfig) -> StatsConfig {
        StatsConfig {
            exclude_outliers: self.exclude_outliers(),
            bootstrap: self.bootstrap_enabled().then(|| bootstrap.clone()),
        }
    }

    /// Banner prefix printed above each table.
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Arbitrage => "ARBITRAGE RESULTS",
            Self::Event => "SHORT-TERM EVENT STUDY",
        }
    }
}

/// A named series of the event panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Column holding the series.
    pub name: String,

    /// Column holding the outlier flag, if the series has one.
    pub outlier_flag: Option<String>,

    /// Summary treatment.
    pub kind: SeriesKind,
}

impl SeriesSpec {
    /// Create a series specification.
    pub fn new(name: impl Into<String>, outlier_flag: Option<&str>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            outlier_flag: outlier_flag.map(str::to_string),
            kind,
        }
    }

    /// Banner printed above the series' summary table.
    pub fn title(&self) -> String {
        format!(
            "{} - DESCRIPTIVE STATISTICS AND HYPOTHESIS TESTS for {}",
            self.kind.heading(),
            self.name
        )
    }
}

impl fmt::Display for SeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outlier_flag {
            Some(flag) => write!(f, "{} (flag {})", self.name, flag),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The arbitrage series: `RET1`, `N01`..`N10`, `RET2`.
pub fn arbitrage_series() -> Vec<SeriesSpec> {
    ARBITRAGE
        .iter()
        .map(|(name, flag)| SeriesSpec::new(*name, Some(flag), SeriesKind::Arbitrage))
        .collect()
}

/// The short-term event series.
pub fn event_series() -> Vec<SeriesSpec> {
    EVENTS
        .iter()
        .map(|name| SeriesSpec::new(*name, None, SeriesKind::Event))
        .collect()
}
