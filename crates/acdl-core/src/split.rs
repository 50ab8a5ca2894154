//! Dataset partitions and their on-disk directory names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three AudioCaps partitions. `dir_name` is a layout contract
/// with downstream consumers and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn dir_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }

    /// Manifest file name for this split (`train.csv`, ...).
    pub fn manifest_file(self) -> String {
        format!("{}.csv", self.dir_name())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.dir_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown split `{0}` (expected train, val or test)")]
pub struct ParseSplitError(String);

impl FromStr for Split {
    type Err = ParseSplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "val" | "valid" | "validation" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            _ => Err(ParseSplitError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_names_are_fixed() {
        let names: Vec<_> = Split::ALL.iter().map(|s| s.dir_name()).collect();
        assert_eq!(names, ["train", "val", "test"]);
        assert_eq!(Split::Val.manifest_file(), "val.csv");
    }

    #[test]
    fn validation_aliases_val() {
        assert_eq!("validation".parse::<Split>().unwrap(), Split::Val);
        assert_eq!("Train".parse::<Split>().unwrap(), Split::Train);
        assert!("dev".parse::<Split>().is_err());
    }
}
