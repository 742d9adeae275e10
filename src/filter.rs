//! Segment filtering and block-list computation.
//!
//! Segments are grouped implicitly by the prefix before the first `-` in
//! their name. Members of a prefix group are mutually unblocked; every group
//! is blocked from every other group.

use regex::{Regex, RegexBuilder};

use crate::error::Error;
use crate::model::Segment;

/// Case-insensitive exclusion filter over segment names.
#[derive(Debug)]
pub struct ExclusionFilter {
    pattern: Regex,
}

impl ExclusionFilter {
    /// Compile the exclusion pattern. A malformed pattern is a fatal
    /// configuration error, surfaced before any remote mutation.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Ok(Self {
            pattern: compile_ci(pattern)?,
        })
    }

    /// Drop segments matching the pattern and sort the survivors by name.
    pub fn filter(&self, mut segments: Vec<Segment>) -> Vec<Segment> {
        segments.retain(|s| !self.pattern.is_match(&s.name));
        segments.sort_by(|a, b| a.name.cmp(&b.name));
        segments
    }
}

/// The prefix group of a segment name: everything before the first `-`, or
/// the whole name when there is none.
pub fn prefix_group(name: &str) -> &str {
    name.split('-').next().unwrap_or(name)
}

/// Compute the block list for `segment` over the filtered segment set.
///
/// A candidate is blocked unless it matches the segment's prefix or full
/// name. Both are applied as unanchored case-insensitive patterns, not
/// equality checks, so a name that happens to match inside another name
/// keeps that pair unblocked. The result is in the (sorted) order of
/// `filtered`.
pub fn block_list(segment: &Segment, filtered: &[Segment]) -> Result<Vec<String>, Error> {
    let prefix = compile_ci(prefix_group(&segment.name))?;
    let own_name = compile_ci(&segment.name)?;

    Ok(filtered
        .iter()
        .filter(|other| !prefix.is_match(&other.name) && !own_name.is_match(&other.name))
        .map(|other| other.name.clone())
        .collect())
}

fn compile_ci(pattern: &str) -> Result<Regex, Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Pattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(names: &[&str]) -> Vec<Segment> {
        names
            .iter()
            .map(|n| Segment {
                name: n.to_string(),
            })
            .collect()
    }

    fn names(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_exclusion_drops_matching_segments() {
        let filter = ExclusionFilter::new("corporate*|corporate-sales").unwrap();
        let filtered = filter.filter(segments(&["corporate-A", "corporate-B", "sales", "hr"]));
        assert_eq!(names(&filtered), vec!["hr", "sales"]);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let filter = ExclusionFilter::new("corporate*").unwrap();
        let filtered = filter.filter(segments(&["Corporate-East", "finance"]));
        assert_eq!(names(&filtered), vec!["finance"]);
    }

    #[test]
    fn test_filtered_segments_sorted_by_name() {
        let filter = ExclusionFilter::new("none-shall-match").unwrap();
        let filtered = filter.filter(segments(&["sales", "finance", "audit"]));
        assert_eq!(names(&filtered), vec!["audit", "finance", "sales"]);
    }

    #[test]
    fn test_malformed_exclusion_pattern_is_error() {
        let err = ExclusionFilter::new("[unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_prefix_group_splits_on_first_dash() {
        assert_eq!(prefix_group("sales-east-1"), "sales");
        assert_eq!(prefix_group("finance"), "finance");
    }

    #[test]
    fn test_block_list_excludes_self_and_prefix_group() {
        let all = segments(&["audit", "sales-east", "sales-west", "vendors"]);
        let blocked = block_list(&all[1], &all).unwrap();
        assert_eq!(blocked, vec!["audit", "vendors"]);
    }

    #[test]
    fn test_block_list_symmetric_across_groups() {
        let all = segments(&["audit", "sales-east", "sales-west", "vendors"]);
        for a in &all {
            for b in &all {
                if prefix_group(&a.name) == prefix_group(&b.name) {
                    continue;
                }
                let a_blocks = block_list(a, &all).unwrap();
                let b_blocks = block_list(b, &all).unwrap();
                assert!(a_blocks.contains(&b.name), "{} should block {}", a.name, b.name);
                assert!(b_blocks.contains(&a.name), "{} should block {}", b.name, a.name);
            }
        }
    }

    #[test]
    fn test_segment_without_dash_is_singleton_group() {
        let all = segments(&["audit", "vendors"]);
        assert_eq!(block_list(&all[0], &all).unwrap(), vec!["vendors"]);
        assert_eq!(block_list(&all[1], &all).unwrap(), vec!["audit"]);
    }

    #[test]
    fn test_two_segment_scenario_blocks_each_other() {
        let filter = ExclusionFilter::new("corporate*").unwrap();
        let filtered = filter.filter(segments(&["corporate-A", "corporate-B", "sales", "hr"]));
        assert_eq!(names(&filtered), vec!["hr", "sales"]);
        assert_eq!(block_list(&filtered[0], &filtered).unwrap(), vec!["sales"]);
        assert_eq!(block_list(&filtered[1], &filtered).unwrap(), vec!["hr"]);
    }

    #[test]
    fn test_prefix_matches_as_pattern_not_equality() {
        // "eng" occurs inside "engineering-west", so the pair stays
        // unblocked even though their prefix groups differ textually.
        let all = segments(&["eng", "engineering-west", "sales"]);
        let blocked = block_list(&all[0], &all).unwrap();
        assert_eq!(blocked, vec!["sales"]);
    }

    #[test]
    fn test_segment_name_invalid_as_pattern_is_error() {
        let all = segments(&["[ops", "sales"]);
        let err = block_list(&all[0], &all).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }
}
