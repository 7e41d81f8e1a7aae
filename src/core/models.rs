use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::VinterError;

/// One record returned by the API: an open-ended mapping of field name to value.
///
/// The client only inspects the `symbol` field and a handful of named fields
/// (`value`, `weights`, `contrib`, schedule dates); everything else is passed through.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The family of index an endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "multi_assets")]
    MultiAsset,
    #[serde(rename = "single_assets")]
    SingleAsset,
    #[serde(rename = "staking_yields")]
    StakingYield,
    #[serde(rename = "nav")]
    Nav,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::MultiAsset,
        AssetCategory::SingleAsset,
        AssetCategory::StakingYield,
        AssetCategory::Nav,
    ];

    /// Wire token used in REST paths (`multi_assets`, `nav`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetCategory::MultiAsset => "multi_assets",
            AssetCategory::SingleAsset => "single_assets",
            AssetCategory::StakingYield => "staking_yields",
            AssetCategory::Nav => "nav",
        }
    }

    pub(crate) fn allowed() -> String {
        join_allowed(Self::ALL.iter().map(|c| c.as_str()))
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for AssetCategory {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for AssetCategory {
    type Err = VinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                VinterError::InvalidArgument(format!(
                    "unknown asset type {s:?}; the asset type must be one of the following: {}",
                    Self::allowed()
                ))
            })
    }
}

/// Sampling cadence of a series.
///
/// Each frequency has a one-letter suffix (`r`, `h`, `d`) that terminates every symbol,
/// and a path token (`real_time`, `hourly`, `daily`) used in REST endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "r")]
    RealTime,
    #[serde(rename = "h")]
    Hourly,
    #[serde(rename = "d")]
    Daily,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::RealTime, Frequency::Hourly, Frequency::Daily];

    /// One-letter suffix carried by symbols of this frequency.
    pub const fn suffix(self) -> &'static str {
        match self {
            Frequency::RealTime => "r",
            Frequency::Hourly => "h",
            Frequency::Daily => "d",
        }
    }

    /// Path token used by the REST endpoints.
    pub const fn path_token(self) -> &'static str {
        match self {
            Frequency::RealTime => "real_time",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
        }
    }

    pub(crate) fn allowed() -> String {
        join_allowed(Self::ALL.iter().map(|f| f.suffix()))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Frequency {
    type Err = VinterError;

    /// Parses a wire suffix (`r`, `h` or `d`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.suffix() == s)
            .ok_or_else(|| {
                VinterError::InvalidArgument(format!(
                    "unknown frequency {s:?}; the frequency must be one of the following valid frequencies: {}",
                    Self::allowed()
                ))
            })
    }
}

/// Static bearer credential sent as the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

fn join_allowed<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}
