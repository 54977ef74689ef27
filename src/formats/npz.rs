// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::{Result, ThermoError};
use crate::extractor::SectionOptions;
use crate::format::TableFormat;
use crate::header::HeaderMap;
use crate::table::ThermoTable;
use log::{info, warn};
use nalgebra::DMatrix;
use ndarray::{arr0, Array0, Array2};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::path::Path;

/// Name of the array holding the thermo data.
pub const DATASET: &str = "thermo";
/// Header entries are stored as scalar arrays named `thermo.attrs/<property>`
/// holding the column index of the property.
pub const ATTRIBUTE_PREFIX: &str = "thermo.attrs/";

/// Numpy `.npz` archive, readable with `numpy.load`.
pub struct NpzFormat;

fn logical_name(name: &str) -> &str {
    name.strip_suffix(".npy").unwrap_or(name)
}

impl TableFormat for NpzFormat {
    fn read(&self, path: &Path, _options: &SectionOptions) -> Result<ThermoTable> {
        let mut npz = NpzReader::new(File::open(path)?)?;

        let mut dataset: Option<Array2<f64>> = None;
        let mut attributes: Vec<(String, i64)> = Vec::new();
        for name in npz.names()? {
            let logical = logical_name(&name);
            if logical == DATASET {
                dataset = Some(npz.by_name(&name)?);
            } else if let Some(property) = logical.strip_prefix(ATTRIBUTE_PREFIX) {
                let index: Array0<i64> = npz.by_name(&name)?;
                attributes.push((property.to_string(), index.into_scalar()));
            } else {
                warn!("ignoring unknown array `{logical}` in {}", path.display());
            }
        }

        let dataset = dataset.ok_or_else(|| ThermoError::MissingDataset(DATASET.to_string()))?;
        let (rows, columns) = dataset.dim();
        if attributes.len() != columns {
            return Err(ThermoError::SchemaMismatch {
                headers: attributes.len(),
                columns,
            });
        }

        attributes.sort_by_key(|&(_, index)| index);
        let mut header = HeaderMap::new();
        for (name, index) in &attributes {
            let index = usize::try_from(*index).map_err(|_| ThermoError::SchemaMismatch {
                headers: attributes.len(),
                columns,
            })?;
            header.insert(name, index);
        }

        info!(
            "read {rows}x{columns} thermo table from {}",
            path.display()
        );
        let data = DMatrix::from_fn(rows, columns, |i, j| dataset[[i, j]]);
        ThermoTable::new(header, data)
    }

    fn write(&self, path: &Path, table: &ThermoTable) -> Result<()> {
        let data = table.data();
        let array = Array2::from_shape_fn((data.nrows(), data.ncols()), |(i, j)| data[(i, j)]);

        let mut npz = NpzWriter::new(File::create(path)?);
        npz.add_array(DATASET, &array)?;
        for (name, index) in table.header().iter() {
            npz.add_array(format!("{ATTRIBUTE_PREFIX}{name}"), &arr0(index as i64))?;
        }
        npz.finish()?;
        Ok(())
    }
}
