use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A declared region of the change set.
///
/// `paths` are prefixes anchored at the repository root: a directory matches
/// every file beneath it, a file matches only itself. An empty list places no
/// filter on the diff, so any change in the tree matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_include: Option<Vec<String>>,
}

impl Rule {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            must_include: None,
        }
    }

    pub fn with_must_include<I, S>(mut self, must_include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_include = Some(must_include.into_iter().map(Into::into).collect());
        self
    }

    /// The existence precondition, if one is declared and non-empty.
    pub fn must_include(&self) -> Option<&[String]> {
        self.must_include
            .as_deref()
            .filter(|paths| !paths.is_empty())
    }
}

/// Top-level shape of the rules manifest. `rules` must be present and be a
/// sequence; an explicit `rules: []` is the only way to declare no rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(deserialize_with = "rules_sequence")]
    pub rules: Vec<Rule>,
}

fn rules_sequence<'de, D>(deserializer: D) -> Result<Vec<Rule>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Rule>>::deserialize(deserializer)?
        .ok_or_else(|| D::Error::custom("`rules` must be a sequence of rules, not null"))
}
