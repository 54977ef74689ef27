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
use log::info;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Binary snapshot of a [`ThermoTable`], encoded with bincode.
pub struct BincodeFormat;

/// On-disk layout. `data` is stored column-major, as nalgebra stores it.
#[derive(Serialize, Deserialize)]
struct TableRecord {
    header: Vec<(String, usize)>,
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

impl From<&ThermoTable> for TableRecord {
    fn from(table: &ThermoTable) -> Self {
        TableRecord {
            header: table
                .header()
                .iter()
                .map(|(name, index)| (name.to_string(), index))
                .collect(),
            rows: table.rows(),
            columns: table.columns(),
            data: table.data().as_slice().to_vec(),
        }
    }
}

impl TryFrom<TableRecord> for ThermoTable {
    type Error = ThermoError;

    fn try_from(record: TableRecord) -> Result<Self> {
        if record.rows.checked_mul(record.columns) != Some(record.data.len()) {
            return Err(ThermoError::SchemaMismatch {
                headers: record.header.len(),
                columns: record.columns,
            });
        }

        let mut header = HeaderMap::new();
        for (name, index) in &record.header {
            header.insert(name, *index);
        }
        let data = DMatrix::from_vec(record.rows, record.columns, record.data);
        ThermoTable::new(header, data)
    }
}

impl TableFormat for BincodeFormat {
    fn read(&self, path: &Path, _options: &SectionOptions) -> Result<ThermoTable> {
        let reader = BufReader::new(File::open(path)?);
        let record: TableRecord = bincode::deserialize_from(reader)?;
        info!(
            "read {}x{} thermo table from {}",
            record.rows,
            record.columns,
            path.display()
        );
        ThermoTable::try_from(record)
    }

    fn write(&self, path: &Path, table: &ThermoTable) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &TableRecord::from(table))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::load;
    use std::path::Path;

    #[test]
    fn round_trip() {
        let table = ThermoTable::open("./src/tests-data/log/multi_run.log").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thermo.bin");
        table.save(&path).unwrap();

        let loaded = load(&path, &SectionOptions::default()).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded.property_names(), table.property_names());
    }

    #[test]
    fn inconsistent_record() {
        let record = TableRecord {
            header: vec![("Step".to_string(), 0), ("Temp".to_string(), 1)],
            rows: 2,
            columns: 2,
            data: vec![0.0, 1.0, 300.0],
        };
        assert!(matches!(
            ThermoTable::try_from(record),
            Err(ThermoError::SchemaMismatch { .. })
        ));

        let record = TableRecord {
            header: vec![("Step".to_string(), 0)],
            rows: 1,
            columns: 2,
            data: vec![0.0, 300.0],
        };
        assert!(matches!(
            ThermoTable::try_from(record),
            Err(ThermoError::SchemaMismatch {
                headers: 1,
                columns: 2
            })
        ));
    }

    #[test]
    fn truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let err = load(Path::new(&path), &SectionOptions::default()).unwrap_err();
        assert!(matches!(err, ThermoError::BincodeError(_)));
    }
}
