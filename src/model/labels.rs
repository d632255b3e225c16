use std::collections::HashMap;
use std::hash::Hash;

/// Scans grouped by subject label. Groups are ordered by first appearance and
/// members within a group by scan index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroups {
    group_of: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl SubjectGroups {
    /// Groups by exact label equality; "1" and "10" are different subjects.
    pub fn from_labels<L: Eq + Hash>(labels: &[L]) -> Self {
        let mut index: HashMap<&L, usize> = HashMap::with_capacity(labels.len());
        let mut group_of = Vec::with_capacity(labels.len());
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (scan, label) in labels.iter().enumerate() {
            let group = *index.entry(label).or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            members[group].push(scan);
            group_of.push(group);
        }

        Self { group_of, members }
    }

    pub fn n_scans(&self) -> usize {
        self.group_of.len()
    }

    pub fn n_groups(&self) -> usize {
        self.members.len()
    }

    /// Subjects with at least two scans.
    pub fn n_repeated_groups(&self) -> usize {
        self.members.iter().filter(|m| m.len() > 1).count()
    }

    /// `ind(scan)`: every scan sharing `scan`'s label, itself included.
    pub fn members_of(&self, scan: usize) -> &[usize] {
        &self.members[self.group_of[scan]]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/labels.rs"]
mod tests;
