use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pitch position codes understood by the player service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    // Defenders
    Cb,
    Rb,
    Lb,
    Lwb,
    Rwb,
    // Midfielders
    Cdm,
    Cm,
    Cam,
    Rm,
    Lm,
    // Forwards
    Rf,
    Lf,
    Cf,
    St,
    Lw,
    Rw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Defender,
    Midfielder,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown position code: {0}")]
pub struct UnknownPosition(pub String);

impl Position {
    pub const ALL: [Position; 16] = [
        Position::Cb,
        Position::Rb,
        Position::Lb,
        Position::Lwb,
        Position::Rwb,
        Position::Cdm,
        Position::Cm,
        Position::Cam,
        Position::Rm,
        Position::Lm,
        Position::Rf,
        Position::Lf,
        Position::Cf,
        Position::St,
        Position::Lw,
        Position::Rw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::Cb => "CB",
            Position::Rb => "RB",
            Position::Lb => "LB",
            Position::Lwb => "LWB",
            Position::Rwb => "RWB",
            Position::Cdm => "CDM",
            Position::Cm => "CM",
            Position::Cam => "CAM",
            Position::Rm => "RM",
            Position::Lm => "LM",
            Position::Rf => "RF",
            Position::Lf => "LF",
            Position::Cf => "CF",
            Position::St => "ST",
            Position::Lw => "LW",
            Position::Rw => "RW",
        }
    }

    pub fn group(&self) -> PositionGroup {
        match self {
            Position::Cb | Position::Rb | Position::Lb | Position::Lwb | Position::Rwb => {
                PositionGroup::Defender
            }
            Position::Cdm | Position::Cm | Position::Cam | Position::Rm | Position::Lm => {
                PositionGroup::Midfielder
            }
            _ => PositionGroup::Forward,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionGroup::Defender => write!(f, "defender"),
            PositionGroup::Midfielder => write!(f, "midfielder"),
            PositionGroup::Forward => write!(f, "forward"),
        }
    }
}
