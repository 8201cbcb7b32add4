use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort keys accepted by the listing endpoint (`sortBy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortBy {
    #[default]
    Name,
    Age,
    Height,
    Positions,
    Nationality,
}

/// Sort order (`order`), sent lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortBy {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Name => "NAME",
            SortBy::Age => "AGE",
            SortBy::Height => "HEIGHT",
            SortBy::Positions => "POSITIONS",
            SortBy::Nationality => "NATIONALITY",
        }
    }
}

impl SortDirection {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "age" => Ok(SortBy::Age),
            "height" => Ok(SortBy::Height),
            "positions" | "position" => Ok(SortBy::Positions),
            "nationality" | "nationalities" => Ok(SortBy::Nationality),
            _ => Err(format!(
                "Invalid sort key '{}'. Valid keys are: name, age, height, positions, nationality",
                s
            )),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort order '{}'. Valid values are: asc, desc", s)),
        }
    }
}
