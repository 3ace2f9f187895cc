//! Model formulas of the form `y ~ a + b + c`.

use crate::error::RegressionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name given to the intercept term.
pub const INTERCEPT: &str = "Intercept";

/// A response regressed on named columns plus an intercept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formula {
    /// Response column.
    pub response: String,
    /// Regressor columns, in order.
    pub regressors: Vec<String>,
}

impl Formula {
    /// Build a formula from its parts.
    pub fn new(response: impl Into<String>, regressors: &[&str]) -> Self {
        Self {
            response: response.into(),
            regressors: regressors.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Parameter names including the leading intercept.
    pub fn param_names(&self) -> Vec<String> {
        std::iter::once(INTERCEPT.to_string())
            .chain(self.regressors.iter().cloned())
            .collect()
    }

    /// Regressor names as string slices.
    pub fn regressor_refs(&self) -> Vec<&str> {
        self.regressors.iter().map(String::as_str).collect()
    }
}

impl FromStr for Formula {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sides = s.split('~');
        let (Some(lhs), Some(rhs), None) = (sides.next(), sides.next(), sides.next()) else {
            return Err(RegressionError::InvalidFormula(format!(
                "expected exactly one '~' in {s:?}"
            )));
        };

        let response = lhs.trim();
        if response.is_empty() {
            return Err(RegressionError::InvalidFormula(format!(
                "missing response in {s:?}"
            )));
        }

        let regressors: Vec<String> = rhs.split('+').map(|t| t.trim().to_string()).collect();
        if regressors.iter().any(String::is_empty) {
            return Err(RegressionError::InvalidFormula(format!(
                "empty regressor term in {s:?}"
            )));
        }

        Ok(Self {
            response: response.to_string(),
            regressors,
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.response, self.regressors.join(" + "))
    }
}
