//! Multi-predicate filtering over a complaint collection.
//!
//! Every criterion is optional; the ones that are set are ANDed. Filtering
//! never reorders: the result is always a subsequence of the input. Sorting is
//! a separate step.

use std::convert::Infallible;
use std::str::FromStr;

use super::model::{Category, Complaint, ComplaintStatus, Priority};

/// Select value used by dashboard filters to mean "no restriction".
pub const ALL: &str = "all";
/// Assignee filter value selecting complaints nobody handles yet.
pub const UNASSIGNED: &str = "unassigned";

/// Either every value or exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// `"all"` (any case) and blank input select everything; anything else is
/// parsed as a single value.
impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl Selection<Category> {
    /// Category filter from user input. Names outside the listed categories
    /// select that literal unlisted category, matching how stored values and
    /// statistics treat them.
    pub fn parse_category(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Self::Only(Category::from(value.trim().to_owned())))
    }
}

/// Restriction on who handles a complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    #[default]
    All,
    /// No staff member assigned.
    Unassigned,
    /// Assigned to exactly this display name.
    Named(String),
}

impl AssigneeFilter {
    pub fn matches(&self, assigned_to: Option<&str>) -> bool {
        let assigned_to = assigned_to.filter(|name| !name.trim().is_empty());
        match self {
            Self::All => true,
            Self::Unassigned => assigned_to.is_none(),
            Self::Named(name) => assigned_to == Some(name.as_str()),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else if trimmed.eq_ignore_ascii_case(UNASSIGNED) {
            Ok(Self::Unassigned)
        } else {
            Ok(Self::Named(trimmed.to_owned()))
        }
    }
}

/// Dashboard filter state.
///
/// # Examples
/// ```
/// use cms_backend::domain::complaints::{ComplaintStatus, FilterCriteria, Selection};
///
/// let criteria = FilterCriteria {
///     status: Selection::Only(ComplaintStatus::Resolved),
///     ..FilterCriteria::default()
/// };
/// assert!(!criteria.is_unfiltered());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Selection<ComplaintStatus>,
    pub category: Selection<Category>,
    pub priority: Selection<Priority>,
    pub assignee: AssigneeFilter,
    /// Case-insensitive substring over title, description and id.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Reset every criterion so the whole collection is shown.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no criterion restricts the result.
    pub fn is_unfiltered(&self) -> bool {
        self.status == Selection::All
            && self.category == Selection::All
            && self.priority == Selection::All
            && self.assignee == AssigneeFilter::All
            && self.search_needle().is_none()
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.matches(&complaint.status())
            && self.category.matches(complaint.category())
            && self.priority.matches(&complaint.priority())
            && self.assignee.matches(complaint.assigned_to())
            && self
                .search_needle()
                .is_none_or(|needle| mentions(complaint, &needle))
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}

fn mentions(complaint: &Complaint, needle: &str) -> bool {
    [
        complaint.title(),
        complaint.description(),
        complaint.id().as_str(),
    ]
    .into_iter()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

/// Complaints satisfying every criterion, in input order.
pub fn apply_filters<'a>(complaints: &'a [Complaint], criteria: &FilterCriteria) -> Vec<&'a Complaint> {
    complaints
        .iter()
        .filter(|complaint| criteria.matches(complaint))
        .collect()
}

/// Order by submission time, newest first. Ties keep their relative order.
pub fn sort_most_recent_first(complaints: &mut [&Complaint]) {
    complaints.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ComplaintBuilder, seed_complaints, utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seeds() -> Vec<Complaint> {
        seed_complaints()
    }

    fn ids(complaints: &[&Complaint]) -> Vec<String> {
        complaints.iter().map(|c| c.id().to_string()).collect()
    }

    #[rstest]
    fn empty_criteria_return_everything_in_order(seeds: Vec<Complaint>) {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unfiltered());
        let filtered = apply_filters(&seeds, &criteria);
        let expected: Vec<&Complaint> = seeds.iter().collect();
        assert_eq!(filtered, expected);
    }

    #[rstest]
    fn resolved_seeds_are_c003_and_c008(seeds: Vec<Complaint>) {
        let criteria = FilterCriteria {
            status: Selection::Only(ComplaintStatus::Resolved),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply_filters(&seeds, &criteria)), vec!["C003", "C008"]);
    }

    #[rstest]
    fn unassigned_selects_complaints_without_handler(seeds: Vec<Complaint>) {
        let criteria = FilterCriteria {
            assignee: AssigneeFilter::Unassigned,
            ..FilterCriteria::default()
        };
        let filtered = apply_filters(&seeds, &criteria);
        assert_eq!(filtered.len(), 7);
        assert!(filtered.iter().all(|c| c.assigned_to().is_none()));
    }

    #[rstest]
    fn named_assignee_requires_exact_match(seeds: Vec<Complaint>) {
        let exact = FilterCriteria {
            assignee: AssigneeFilter::Named("Mike Wilson".to_owned()),
            ..FilterCriteria::default()
        };
        assert_eq!(
            ids(&apply_filters(&seeds, &exact)),
            vec!["C001", "C003", "C004"]
        );

        let partial = FilterCriteria {
            assignee: AssigneeFilter::Named("Mike".to_owned()),
            ..FilterCriteria::default()
        };
        assert!(apply_filters(&seeds, &partial).is_empty());
    }

    #[rstest]
    #[case("LIBRARY", 2)]
    #[case("wifi", 1)]
    #[case("c00", 9)]
    #[case("c010", 1)]
    #[case("   ", 10)]
    #[case("no such words anywhere", 0)]
    fn search_is_case_insensitive(
        seeds: Vec<Complaint>,
        #[case] query: &str,
        #[case] expected: usize,
    ) {
        let criteria = FilterCriteria {
            search: Some(query.to_owned()),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&seeds, &criteria).len(), expected);
    }

    #[rstest]
    fn criteria_are_combined(seeds: Vec<Complaint>) {
        let criteria = FilterCriteria {
            status: Selection::Only(ComplaintStatus::InProgress),
            priority: Selection::Only(Priority::High),
            ..FilterCriteria::default()
        };
        let filtered = apply_filters(&seeds, &criteria);
        assert!(!filtered.is_empty());
        for complaint in &filtered {
            assert_eq!(complaint.status(), ComplaintStatus::InProgress);
            assert_eq!(complaint.priority(), Priority::High);
        }
        let expected: Vec<&Complaint> = seeds.iter().filter(|c| criteria.matches(c)).collect();
        assert_eq!(filtered, expected);
    }

    #[rstest]
    fn filter_output_is_a_subsequence(seeds: Vec<Complaint>) {
        let criteria = FilterCriteria {
            category: Selection::Only(Category::Infrastructure),
            ..FilterCriteria::default()
        };
        let filtered = apply_filters(&seeds, &criteria);
        let mut remaining = seeds.iter();
        for complaint in filtered {
            assert!(remaining.any(|candidate| std::ptr::eq(candidate, complaint)));
        }
    }

    #[rstest]
    fn clear_resets_every_criterion() {
        let mut criteria = FilterCriteria {
            status: Selection::Only(ComplaintStatus::Pending),
            category: Selection::Only(Category::Cafeteria),
            priority: Selection::Only(Priority::Low),
            assignee: AssigneeFilter::Unassigned,
            search: Some("wifi".to_owned()),
        };
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[rstest]
    fn empty_collection_filters_to_nothing() {
        let criteria = FilterCriteria {
            status: Selection::Only(ComplaintStatus::Pending),
            ..FilterCriteria::default()
        };
        assert!(apply_filters(&[], &criteria).is_empty());
    }

    #[rstest]
    #[case("all", Selection::All)]
    #[case("ALL", Selection::All)]
    #[case("", Selection::All)]
    #[case("In Progress", Selection::Only(ComplaintStatus::InProgress))]
    #[case("in-progress", Selection::Only(ComplaintStatus::InProgress))]
    fn status_selection_parses_select_values(
        #[case] raw: &str,
        #[case] expected: Selection<ComplaintStatus>,
    ) {
        assert_eq!(raw.parse::<Selection<ComplaintStatus>>(), Ok(expected));
    }

    #[rstest]
    fn selection_rejects_unknown_values() {
        assert!("Closed".parse::<Selection<ComplaintStatus>>().is_err());
    }

    #[rstest]
    #[case("all", AssigneeFilter::All)]
    #[case("Unassigned", AssigneeFilter::Unassigned)]
    #[case(" Mike Wilson ", AssigneeFilter::Named("Mike Wilson".to_owned()))]
    fn assignee_filter_parses_select_values(#[case] raw: &str, #[case] expected: AssigneeFilter) {
        assert_eq!(raw.parse::<AssigneeFilter>(), Ok(expected));
    }

    #[rstest]
    fn sorting_is_newest_first_and_stable() {
        let older = ComplaintBuilder::new("C1")
            .submitted_at(utc(2025, 1, 10, 8, 0, 0))
            .build();
        let tie_a = ComplaintBuilder::new("C2")
            .submitted_at(utc(2025, 1, 12, 8, 0, 0))
            .build();
        let tie_b = ComplaintBuilder::new("C3")
            .submitted_at(utc(2025, 1, 12, 8, 0, 0))
            .build();
        let collection = vec![older, tie_a, tie_b];
        let mut view = apply_filters(&collection, &FilterCriteria::default());
        sort_most_recent_first(&mut view);
        assert_eq!(ids(&view), vec!["C2", "C3", "C1"]);
    }

    #[rstest]
    #[case("all", Selection::All)]
    #[case("library services", Selection::Only(Category::LibraryServices))]
    #[case(" Parking ", Selection::Only(Category::Unlisted("Parking".to_owned())))]
    fn category_filters_accept_unlisted_names(
        #[case] input: &str,
        #[case] expected: Selection<Category>,
    ) {
        assert_eq!(Selection::parse_category(input), expected);
    }

    #[rstest]
    fn unlisted_category_filter_selects_matching_records() {
        let complaints = vec![
            ComplaintBuilder::new("C1")
                .category(Category::Unlisted("Parking".to_owned()))
                .build(),
            ComplaintBuilder::new("C2").build(),
        ];
        let criteria = FilterCriteria {
            category: Selection::parse_category("Parking"),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply_filters(&complaints, &criteria)), vec!["C1"]);
    }
}
