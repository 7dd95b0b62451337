use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail { responsible: BTreeSet<String> },
}

impl Verdict {
    /// Decide from the reported advisory ids and the suppressed ids.
    ///
    /// The run fails exactly on `reported - suppressed`.
    pub fn decide<'a, I>(reported: I, suppressed: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let active: BTreeSet<String> = reported
            .into_iter()
            .filter(|id| !suppressed.contains(*id))
            .map(str::to_string)
            .collect();

        if active.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail {
                responsible: active,
            }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn responsible(&self) -> Option<&BTreeSet<String>> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail { responsible } => Some(responsible),
        }
    }
}
