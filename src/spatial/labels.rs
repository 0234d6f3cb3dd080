//! Label attachments and the domain container binding them to a point set
//!
//! A label is either categorical (finite set of string values, stored as
//! integer codes against a sorted level table) or continuous (one real number
//! per point). Any number of named attachments may coexist on one point set,
//! and every attachment is length-aligned with it by construction.

use std::collections::BTreeMap;

use crate::io::error::{AnalysisError, Result, data_format};
use crate::spatial::boundary::Boundary;
use crate::spatial::points::PointSet;

/// Categorical per-point label with sorted distinct levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalLabel {
    codes: Vec<usize>,
    levels: Vec<String>,
}

impl CategoricalLabel {
    /// Build a categorical label from one raw value per point
    ///
    /// Levels are the sorted distinct values; codes index into that table.
    pub fn from_values(values: &[String]) -> Self {
        let mut levels: Vec<String> = values.to_vec();
        levels.sort();
        levels.dedup();

        let codes = values
            .iter()
            .map(|value| levels.binary_search(value).unwrap_or(0))
            .collect();

        Self { codes, levels }
    }

    /// Sorted distinct level values
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Per-point level codes, aligned with point identity
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// Number of labelled points
    pub const fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the label covers no points
    pub const fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code of a level value, if the value occurs in this label
    pub fn code_of(&self, value: &str) -> Option<usize> {
        self.levels.binary_search_by(|level| level.as_str().cmp(value)).ok()
    }

    /// Identities of all points carrying the given level code
    pub fn points_with_code(&self, code: usize) -> Vec<usize> {
        self.codes
            .iter()
            .enumerate()
            .filter(|&(_, &point_code)| point_code == code)
            .map(|(identity, _)| identity)
            .collect()
    }

    /// Total occurrences of each level, in level order
    pub fn level_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.levels.len()];
        for &code in &self.codes {
            if let Some(count) = counts.get_mut(code) {
                *count += 1;
            }
        }
        counts
    }
}

/// Continuous per-point label such as a marker intensity
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousLabel {
    values: Vec<f64>,
}

impl ContinuousLabel {
    /// Build a continuous label from one value per point
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Per-point values, aligned with point identity
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of labelled points
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the label covers no points
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Minimum and maximum value, ignoring NaN entries
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &value in &self.values {
            if value.is_nan() {
                continue;
            }
            bounds = Some(bounds.map_or((value, value), |(low, high)| {
                (low.min(value), high.max(value))
            }));
        }
        bounds
    }
}

/// Sum type over the two supported label kinds
#[derive(Debug, Clone, PartialEq)]
pub enum LabelAttachment {
    /// Finite set of string values, one per point
    Categorical(CategoricalLabel),
    /// Real number per point
    Continuous(ContinuousLabel),
}

impl LabelAttachment {
    /// Number of labelled points
    pub const fn len(&self) -> usize {
        match self {
            Self::Categorical(label) => label.len(),
            Self::Continuous(label) => label.len(),
        }
    }

    /// Check whether the attachment covers no points
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Named container bundling a point set, its labels, and a boundary
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    points: PointSet,
    boundary: Boundary,
    labels: BTreeMap<String, LabelAttachment>,
}

impl Domain {
    /// Create a domain, inferring a bounding-box boundary when none is given
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if no boundary is supplied and the point
    /// set is empty or degenerate (zero-area bounding box)
    pub fn new(
        name: impl Into<String>,
        points: PointSet,
        boundary: Option<Boundary>,
    ) -> Result<Self> {
        let boundary = match boundary {
            Some(boundary) => boundary,
            None => Boundary::bounding_box_of(&points)?,
        };

        Ok(Self {
            name: name.into(),
            points,
            boundary,
            labels: BTreeMap::new(),
        })
    }

    /// Domain name, typically the source file stem
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immutable point set
    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    /// The spatial boundary
    pub const fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Names of all attached labels in sorted order
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Attach a named label to the domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the attachment length differs from the
    /// point count
    pub fn attach_label(
        &mut self,
        name: impl Into<String>,
        attachment: LabelAttachment,
    ) -> Result<()> {
        if attachment.len() != self.points.len() {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!(
                    "label length {} does not match point count {}",
                    attachment.len(),
                    self.points.len()
                ),
            });
        }

        self.labels.insert(name.into(), attachment);
        Ok(())
    }

    /// Look up a named label attachment
    pub fn label(&self, name: &str) -> Option<&LabelAttachment> {
        self.labels.get(name)
    }

    /// Look up a named categorical label
    ///
    /// # Errors
    ///
    /// Returns `DataFormat` if the label is absent or continuous
    pub fn categorical(&self, name: &str) -> Result<&CategoricalLabel> {
        match self.labels.get(name) {
            Some(LabelAttachment::Categorical(label)) => Ok(label),
            Some(LabelAttachment::Continuous(_)) => {
                Err(data_format(&name, &"label is continuous, expected categorical"))
            }
            None => Err(data_format(&name, &"no label attachment with this name")),
        }
    }

    /// Look up a named continuous label
    ///
    /// # Errors
    ///
    /// Returns `DataFormat` if the label is absent or categorical
    pub fn continuous(&self, name: &str) -> Result<&ContinuousLabel> {
        match self.labels.get(name) {
            Some(LabelAttachment::Continuous(label)) => Ok(label),
            Some(LabelAttachment::Categorical(_)) => {
                Err(data_format(&name, &"label is categorical, expected continuous"))
            }
            None => Err(data_format(&name, &"no label attachment with this name")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_levels_are_sorted_distinct() {
        let values = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        let label = CategoricalLabel::from_values(&values);
        assert_eq!(label.levels(), ["a", "b", "c"]);
        assert_eq!(label.codes(), [1, 0, 1, 2]);
        assert_eq!(label.level_counts(), vec![1, 2, 1]);
        assert_eq!(label.points_with_code(1), vec![0, 2]);
    }

    #[test]
    fn test_attach_label_rejects_misaligned_length() {
        let Ok(points) = PointSet::new(vec![[0.0, 0.0], [1.0, 1.0]]) else {
            unreachable!("finite coordinates must construct")
        };
        let Ok(mut domain) = Domain::new("test", points, None) else {
            unreachable!("non-degenerate points must construct")
        };

        let short = LabelAttachment::Continuous(ContinuousLabel::from_values(vec![1.0]));
        assert!(domain.attach_label("marker", short).is_err());
    }
}
