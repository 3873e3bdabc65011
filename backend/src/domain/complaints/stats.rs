//! Summary statistics for dashboards.

use super::model::{Category, Complaint, ComplaintStatus, Priority};

/// Number of categories shown in the "top categories" chart.
pub const TOP_CATEGORY_COUNT: usize = 5;

/// Counts keyed by value, in a stable key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakdown<K> {
    entries: Vec<(K, usize)>,
}

impl<K: PartialEq> Breakdown<K> {
    fn with_keys(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            entries: keys.into_iter().map(|key| (key, 0)).collect(),
        }
    }

    fn increment(&mut self, key: K) {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 += 1;
        } else {
            self.entries.push((key, 1));
        }
    }

    /// Count for `key`, zero when absent.
    pub fn get(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> Default for Breakdown<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

/// Derived statistics over a complaint collection.
///
/// Status and priority breakdowns always list every value (zero when
/// unused); the category breakdown lists the categories present, in the
/// order they first occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintStats {
    total: usize,
    by_status: Breakdown<ComplaintStatus>,
    by_priority: Breakdown<Priority>,
    by_category: Breakdown<Category>,
    assignees: Vec<String>,
}

impl ComplaintStats {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count_by_status(&self) -> &Breakdown<ComplaintStatus> {
        &self.by_status
    }

    pub fn status_count(&self, status: ComplaintStatus) -> usize {
        self.by_status.get(&status)
    }

    /// Share of complaints in `status`, rounded to the nearest whole percent
    /// (halves round up). Zero for an empty collection.
    pub fn status_percentage(&self, status: ComplaintStatus) -> u8 {
        percentage(self.status_count(status), self.total)
    }

    pub fn count_by_priority(&self) -> &Breakdown<Priority> {
        &self.by_priority
    }

    pub fn high_priority(&self) -> usize {
        self.by_priority.get(&Priority::High)
    }

    pub fn count_by_category(&self) -> &Breakdown<Category> {
        &self.by_category
    }

    /// The `n` most common categories, most common first. Categories with
    /// equal counts keep their first-occurrence order.
    pub fn top_categories(&self, n: usize) -> Vec<(&Category, usize)> {
        let mut ranked: Vec<(&Category, usize)> = self.by_category.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Distinct non-empty assignee names in first-occurrence order.
    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }

    /// Distinct categories in first-occurrence order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.by_category.iter().map(|(category, _)| category)
    }
}

/// Compute [`ComplaintStats`] over `complaints`.
///
/// # Examples
/// ```
/// use cms_backend::domain::complaints::{ComplaintStatus, aggregate};
///
/// let stats = aggregate(&[]);
/// assert_eq!(stats.total(), 0);
/// assert_eq!(stats.status_percentage(ComplaintStatus::Resolved), 0);
/// ```
pub fn aggregate(complaints: &[Complaint]) -> ComplaintStats {
    let mut by_status = Breakdown::with_keys(ComplaintStatus::ALL);
    let mut by_priority = Breakdown::with_keys(Priority::ALL);
    let mut by_category = Breakdown::default();
    let mut assignees: Vec<String> = Vec::new();

    for complaint in complaints {
        by_status.increment(complaint.status());
        by_priority.increment(complaint.priority());
        by_category.increment(complaint.category().clone());
        if let Some(name) = complaint.assigned_to().filter(|name| !name.trim().is_empty()) {
            if !assignees.iter().any(|known| known == name) {
                assignees.push(name.to_owned());
            }
        }
    }

    ComplaintStats {
        total: complaints.len(),
        by_status,
        by_priority,
        by_category,
        assignees,
    }
}

fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (count.saturating_mul(200) + total) / total.saturating_mul(2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
