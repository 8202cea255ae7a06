//! Keyword Matcher: which of the candidate's skills a job description mentions.
//!
//! Matching is a case-insensitive substring test against the whole description.
//! It is not word-boundary aware: a short skill such as "R" also matches inside
//! "HR". Output is always a subset of the input skill set.

use std::collections::{BTreeSet, HashSet};

use crate::models::profile::Skills;

/// Candidate skills, deduplicated case-insensitively (first spelling wins).
/// Blank entries are dropped.
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect();
        Self { skills }
    }

    /// Technical and soft skills from the master profile.
    pub fn from_profile(skills: &Skills) -> Self {
        Self::new(skills.all())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Skills found in a job description, original casing preserved.
/// Ordered only so prompts and logs are deterministic.
pub type MatchedKeywords = BTreeSet<String>;

pub fn match_keywords(description: &str, skills: &SkillSet) -> MatchedKeywords {
    let haystack = description.to_lowercase();
    skills
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(str::to_string)
        .collect()
}
