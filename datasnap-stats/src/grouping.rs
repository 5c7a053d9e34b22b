use datasnap_core::{Dataset, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    pub values: Vec<f64>,
}

/// Group label to numeric values, in order of each label's first appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupMap {
    groups: Vec<Group>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the group named `label`, creating the group if needed.
    pub fn push(&mut self, label: &str, value: f64) {
        match self.groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.values.push(value),
            None => self.groups.push(Group {
                label: label.to_string(),
                values: vec![value],
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn total_len(&self) -> usize {
        self.groups.iter().map(|g| g.values.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for GroupMap {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        let mut map = GroupMap::new();
        for (label, values) in iter {
            let label = label.into();
            for value in values {
                map.push(&label, value);
            }
        }
        map
    }
}

/// Split `value_column` by the trimmed labels of `group_column`.
///
/// A row is skipped when its value does not coerce to a number or its label
/// is blank, so no group is ever created for the empty label.
pub fn group_numeric(dataset: &Dataset, value_column: &str, group_column: &str) -> Result<GroupMap> {
    let mut map = GroupMap::new();

    for (value, label) in dataset
        .column_values(value_column)?
        .zip(dataset.column_values(group_column)?)
    {
        let (Some(value), Some(label)) = (value.as_f64(), label.label()) else {
            continue;
        };
        map.push(&label, value);
    }

    tracing::debug!(
        value_column,
        group_column,
        groups = map.len(),
        values = map.total_len(),
        "grouped numeric column"
    );

    Ok(map)
}
