// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::fmt;

use thiserror::Error;

/// Which end of a range filter failed to match any row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Start,
    End,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Start => write!(f, "start"),
            BoundSide::End => write!(f, "end"),
        }
    }
}

/// What was wrong with a data row inside a thermo block.
#[derive(Debug, Clone, PartialEq)]
pub enum RowDefect {
    FieldCount { expected: usize, found: usize },
    NotNumeric(String),
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowDefect::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, got {found}")
            }
            RowDefect::NotNumeric(token) => write!(f, "`{token}` is not a number"),
        }
    }
}

fn incomplete_hint(suggest: &bool) -> &'static str {
    if *suggest {
        " (use incomplete mode if the run did not finish)"
    } else {
        ""
    }
}

#[derive(Error, Debug)]
pub enum ThermoError {
    #[error("keyword `{keyword}` not found in log file{}", incomplete_hint(.suggest_incomplete))]
    KeywordNotFound {
        keyword: String,
        suggest_incomplete: bool,
    },
    #[error("no thermo data after the header at line {header_line}")]
    EmptyDataBlock { header_line: usize },
    #[error("malformed thermo row at line {line}: {defect}")]
    MalformedRow { line: usize, defect: RowDefect },
    #[error("unknown property `{name}`, available properties are: {}", .available.join(", "))]
    UnknownProperty { name: String, available: Vec<String> },
    #[error("a time range and a step range can not be used together")]
    ConflictingRangeFilter,
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: f64, end: f64 },
    #[error("a time range was requested but there is no `Time` column")]
    MissingTimeColumn,
    #[error("a step range was requested but there is no `Step` column")]
    MissingStepColumn,
    #[error("range {side} {bound} is outside of the values in the `{column}` column")]
    RangeOutOfBounds {
        column: &'static str,
        bound: f64,
        side: BoundSide,
    },
    #[error("schema mismatch: {headers} header entries for {columns} data columns")]
    SchemaMismatch { headers: usize, columns: usize },
    #[error("container has no `{0}` dataset")]
    MissingDataset(String),
    #[error("Unsupported file format: `{0}`")]
    UnsupportedFileFormat(String),
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("bincode error: {0}")]
    BincodeError(#[from] bincode::Error),
    #[error("npz read error: {0}")]
    NpzReadError(#[from] ndarray_npy::ReadNpzError),
    #[error("npz write error: {0}")]
    NpzWriteError(#[from] ndarray_npy::WriteNpzError),
}

pub type Result<T> = std::result::Result<T, ThermoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_hint_only_when_suggested() {
        let err = ThermoError::KeywordNotFound {
            keyword: "Loop".to_string(),
            suggest_incomplete: true,
        };
        assert!(err.to_string().contains("incomplete mode"));

        let err = ThermoError::KeywordNotFound {
            keyword: "Step".to_string(),
            suggest_incomplete: false,
        };
        assert_eq!(err.to_string(), "keyword `Step` not found in log file");
    }

    #[test]
    fn unknown_property_lists_names() {
        let err = ThermoError::UnknownProperty {
            name: "Bogus".to_string(),
            available: vec!["Step".to_string(), "Temp".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown property `Bogus`, available properties are: Step, Temp"
        );
    }
}
