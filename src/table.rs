// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::{BoundSide, Result, ThermoError};
use crate::extractor::SectionOptions;
use crate::format::{self, Format};
use crate::header::HeaderMap;
use nalgebra::DMatrix;
use std::path::Path;

const TIME_COLUMN: &str = "Time";
const STEP_COLUMN: &str = "Step";

/// Optional lower and upper bound on a `Time` or `Step` column, both inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl Bounds {
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        Bounds { start, end }
    }

    pub fn between(start: f64, end: f64) -> Self {
        Bounds::new(Some(start), Some(end))
    }

    pub fn at_least(start: f64) -> Self {
        Bounds::new(Some(start), None)
    }

    pub fn at_most(end: f64) -> Self {
        Bounds::new(None, Some(end))
    }

    fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Thermodynamic data extracted from a single section of a LAMMPS log.
///
/// The header and the data always describe the same columns: every header
/// entry points to a column of the data matrix, and there is one entry per
/// column.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoTable {
    header: HeaderMap,
    data: DMatrix<f64>,
}

impl ThermoTable {
    /// Creates a table, checking that `header` and `data` agree.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::SchemaMismatch`] if the number of header entries
    /// differs from the number of columns or an entry points outside the data.
    pub fn new(header: HeaderMap, data: DMatrix<f64>) -> Result<Self> {
        let columns = data.ncols();
        if header.len() != columns || header.iter().any(|(_, index)| index >= columns) {
            return Err(ThermoError::SchemaMismatch {
                headers: header.len(),
                columns,
            });
        }
        Ok(ThermoTable { header, data })
    }

    /// Loads a table from `path` with the default section options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        format::load(path.as_ref(), &SectionOptions::default())
    }

    /// Saves the table to `path`, choosing the container from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::UnsupportedFileFormat`] for anything that is not
    /// a container extension, since log files are never written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.save_with_format(path, Format::new(path))
    }

    pub fn save_with_format(&self, path: impl AsRef<Path>, format: Format) -> Result<()> {
        format::save(self, path.as_ref(), format)
    }

    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// All property names, in column order.
    pub fn property_names(&self) -> Vec<&str> {
        self.header.names()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .get(name)
            .ok_or_else(|| ThermoError::UnknownProperty {
                name: name.to_string(),
                available: self.property_names().into_iter().map(String::from).collect(),
            })
    }

    fn column_indices<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect()
    }

    /// Values of a single property, one per row.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        Ok(self.data.column(index).iter().copied().collect())
    }

    /// Extract the given properties for every row, in the requested order.
    ///
    /// Properties may be repeated, producing repeated columns.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::UnknownProperty`] for the first unknown name.
    pub fn extract<S: AsRef<str>>(&self, names: &[S]) -> Result<DMatrix<f64>> {
        let columns = self.column_indices(names)?;
        Ok(self.slice(0, self.rows(), &columns))
    }

    /// Extract the given properties, restricted to a time or step range.
    ///
    /// Rows are selected from the first one whose value is at least
    /// `start` up to the last one whose value is at most `end`. The filtered
    /// column must be sorted in ascending order, this is not checked. A range
    /// with neither bound set selects every row.
    ///
    /// # Errors
    ///
    /// - [`ThermoError::ConflictingRangeFilter`] if both ranges are given;
    /// - [`ThermoError::MissingTimeColumn`] or [`ThermoError::MissingStepColumn`]
    ///   if a bound is set and the table lacks the column;
    /// - [`ThermoError::InvalidRange`] if `start > end`;
    /// - [`ThermoError::RangeOutOfBounds`] if no row satisfies one of the bounds;
    /// - [`ThermoError::UnknownProperty`] for unknown names.
    pub fn query<S: AsRef<str>>(
        &self,
        names: &[S],
        time: Option<Bounds>,
        step: Option<Bounds>,
    ) -> Result<DMatrix<f64>> {
        let (start, end) = match (time, step) {
            (Some(_), Some(_)) => return Err(ThermoError::ConflictingRangeFilter),
            (Some(bounds), None) => {
                self.row_range(TIME_COLUMN, bounds, ThermoError::MissingTimeColumn)?
            }
            (None, Some(bounds)) => {
                self.row_range(STEP_COLUMN, bounds, ThermoError::MissingStepColumn)?
            }
            (None, None) => (0, self.rows()),
        };

        let columns = self.column_indices(names)?;
        Ok(self.slice(start, end, &columns))
    }

    /// Resolves `bounds` against `column` into a `[start, end)` row range.
    fn row_range(
        &self,
        column: &'static str,
        bounds: Bounds,
        missing: ThermoError,
    ) -> Result<(usize, usize)> {
        if bounds.is_unbounded() {
            return Ok((0, self.rows()));
        }

        let index = self.header.get(column).ok_or(missing)?;

        if let (Some(start), Some(end)) = (bounds.start, bounds.end) {
            if start > end {
                return Err(ThermoError::InvalidRange { start, end });
            }
        }

        let values: Vec<f64> = self.data.column(index).iter().copied().collect();

        let first = match bounds.start {
            Some(bound) => {
                values
                    .iter()
                    .position(|&v| v >= bound)
                    .ok_or(ThermoError::RangeOutOfBounds {
                        column,
                        bound,
                        side: BoundSide::Start,
                    })?
            }
            None => 0,
        };

        let last = match bounds.end {
            Some(bound) => {
                values
                    .iter()
                    .rposition(|&v| v <= bound)
                    .ok_or(ThermoError::RangeOutOfBounds {
                        column,
                        bound,
                        side: BoundSide::End,
                    })?
                    + 1
            }
            None => self.rows(),
        };

        Ok((first, last.max(first)))
    }

    fn slice(&self, start: usize, end: usize, columns: &[usize]) -> DMatrix<f64> {
        DMatrix::from_fn(end - start, columns.len(), |i, j| {
            self.data[(start + i, columns[j])]
        })
    }
}
