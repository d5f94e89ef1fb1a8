#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// Gender recorded on a user profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "male"))]
    Male,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "female"))]
    Female,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "other"))]
    Other,
}

impl Gender {
    pub const ALL: &'static [Gender] = &[Self::Male, Self::Female, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::new(
                "gender",
                s,
                &Self::ALL.iter().map(|g| g.as_str()).collect::<Vec<_>>(),
            )),
        }
    }
}

/// Eligibility category of a contest.
///
/// `Male` and `Female` contests are restricted to users of that gender;
/// `Open` contests admit everyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MALE"))]
    Male,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "FEMALE"))]
    Female,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "OPEN"))]
    Open,
}

impl Category {
    pub const ALL: &'static [Category] = &[Self::Male, Self::Female, Self::Open];

    /// Whether a user of the given gender may take part in (or be counted
    /// toward) a contest of this category.
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            Self::Open => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Open => "OPEN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "OPEN" => Ok(Self::Open),
            _ => Err(ParseEnumError::new(
                "category",
                s,
                &Self::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
            )),
        }
    }
}
