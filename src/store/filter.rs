use serde::{Deserialize, Serialize};

/// Comparison operator of one filter condition.
///
/// Equality is all the CMS needs today; the enum leaves room for the rest of
/// the backend's operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub op: Op,
    pub value: String,
}

/// Conjunction of `(field, op, value)` conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op: Op::Eq,
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate the conjunction against a field probe.
    ///
    /// `probe` yields the record's value for a field name, `None` when the
    /// field is absent (which fails the condition).
    pub fn matches<'a, F>(&self, probe: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.conditions.iter().all(|cond| match cond.op {
            Op::Eq => probe(&cond.field) == Some(cond.value.as_str()),
        })
    }
}
