// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::{Result, ThermoError};
use crate::extractor::SectionOptions;
use crate::formats::{binary::BincodeFormat, lammps::LogFormat, npz::NpzFormat};
use crate::table::ThermoTable;
use log::debug;
use phf::phf_map;
use std::path::Path;

/// Supported file formats for thermo data.
///
/// - `Log`: LAMMPS log file, parsed with the section extractor.
/// - `Bincode`: serialized [`ThermoTable`], written by this crate.
/// - `Npz`: numpy archive holding the data matrix and its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Log,
    Bincode,
    Npz,
}

/// Container extensions. Any other extension is read as a log file.
static CONTAINER_EXTENSIONS: phf::Map<&'static str, Format> = phf_map! {
    "bin" => Format::Bincode,
    "bincode" => Format::Bincode,
    "npz" => Format::Npz,
};

impl Format {
    /// Infers the format from the extension of `path`, case insensitively.
    pub fn new(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        CONTAINER_EXTENSIONS
            .get(ext.as_str())
            .copied()
            .unwrap_or(Format::Log)
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Format::Log)
    }
}

/// Common interface of the thermo data readers and writers.
pub trait TableFormat {
    /// Reads a [`ThermoTable`] from `path`. `options` only matter for text logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can not be read or its content is invalid.
    fn read(&self, path: &Path, options: &SectionOptions) -> Result<ThermoTable>;

    /// Writes `table` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the format is read-only.
    fn write(&self, path: &Path, table: &ThermoTable) -> Result<()>;
}

impl TableFormat for Format {
    fn read(&self, path: &Path, options: &SectionOptions) -> Result<ThermoTable> {
        match self {
            Format::Log => LogFormat.read(path, options),
            Format::Bincode => BincodeFormat.read(path, options),
            Format::Npz => NpzFormat.read(path, options),
        }
    }

    fn write(&self, path: &Path, table: &ThermoTable) -> Result<()> {
        match self {
            Format::Log => LogFormat.write(path, table),
            Format::Bincode => BincodeFormat.write(path, table),
            Format::Npz => NpzFormat.write(path, table),
        }
    }
}

/// Loads thermo data from `path`, guessing the format from its extension.
///
/// Container files are deserialized directly; every other file is scanned as
/// a LAMMPS log with `options`.
///
/// # Errors
///
/// Returns an error if reading, parsing or deserializing fails.
pub fn load(path: &Path, options: &SectionOptions) -> Result<ThermoTable> {
    load_with_format(path, Format::new(path), options)
}

/// Loads thermo data from `path` with an explicit `format`.
///
/// # Errors
///
/// Returns an error if reading, parsing or deserializing fails.
pub fn load_with_format(
    path: &Path,
    format: Format,
    options: &SectionOptions,
) -> Result<ThermoTable> {
    debug!("loading {} as {format:?}", path.display());
    format.read(path, options)
}

pub(crate) fn save(table: &ThermoTable, path: &Path, format: Format) -> Result<()> {
    if !format.is_container() {
        return Err(ThermoError::UnsupportedFileFormat(
            path.display().to_string(),
        ));
    }
    debug!("saving {} as {format:?}", path.display());
    format.write(path, table)
}
