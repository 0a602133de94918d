use serde::{Deserialize, Serialize};
use std::fmt;

/// Square matrix of signed force coefficients, indexed `[acted_on][acting]`.
///
/// `get(a, b)` is the coefficient applied to a particle of type `a` because of a
/// particle of type `b`. The matrix is not symmetric in general.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionTable {
    num_types: usize,
    values: Vec<f64>,
}

impl InteractionTable {
    /// All-zero table.
    #[must_use]
    pub fn new(num_types: usize) -> Self {
        Self {
            num_types,
            values: vec![0.0; num_types * num_types],
        }
    }

    /// Builds a table from square rows. Returns `None` if any row has the wrong length.
    #[must_use]
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        Some(Self {
            num_types: n,
            values: rows.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    #[must_use]
    pub fn num_types(&self) -> usize {
        self.num_types
    }

    #[inline]
    #[must_use]
    pub fn get(&self, acted_on: usize, acting: usize) -> f64 {
        self.values[acted_on * self.num_types + acting]
    }

    #[inline]
    pub fn set(&mut self, acted_on: usize, acting: usize, value: f64) {
        self.values[acted_on * self.num_types + acting] = value;
    }

    /// Coefficients felt by type `acted_on`, one per acting type.
    #[inline]
    #[must_use]
    pub fn row(&self, acted_on: usize) -> &[f64] {
        let start = acted_on * self.num_types;
        &self.values[start..start + self.num_types]
    }

    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// Display label for a type index: `A`..`Z`, then `T26`, `T27`, ...
    #[must_use]
    pub fn type_label(index: usize) -> String {
        if index < 26 {
            char::from(b'A' + index as u8).to_string()
        } else {
            format!("T{index}")
        }
    }
}

impl fmt::Display for InteractionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in 0..self.num_types {
            write!(f, "Type {}: [", Self::type_label(a))?;
            for (b, v) in self.row(a).iter().enumerate() {
                if b > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v:+.4}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
