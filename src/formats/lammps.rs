// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::{Result, ThermoError};
use crate::extractor::{extract, SectionOptions};
use crate::format::TableFormat;
use crate::table::ThermoTable;
use log::info;
use std::fs;
use std::path::Path;

/// LAMMPS log files. Read only.
pub struct LogFormat;

impl LogFormat {
    /// Parses the thermo section selected by `options` out of log `text`.
    pub fn parse(text: &str, options: &SectionOptions) -> Result<ThermoTable> {
        let lines: Vec<&str> = text.lines().collect();
        let (header, data) = extract(&lines, options)?;
        ThermoTable::new(header, data)
    }
}

impl TableFormat for LogFormat {
    fn read(&self, path: &Path, options: &SectionOptions) -> Result<ThermoTable> {
        let text = fs::read_to_string(path)?;
        info!("scanning {} for thermo data", path.display());
        LogFormat::parse(&text, options)
    }

    fn write(&self, path: &Path, _table: &ThermoTable) -> Result<()> {
        Err(ThermoError::UnsupportedFileFormat(
            path.display().to_string(),
        ))
    }
}
