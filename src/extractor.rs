// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::{Result, RowDefect, ThermoError};
use crate::header::HeaderMap;
use log::{debug, info, warn};
use nalgebra::DMatrix;

/// Where to find the thermo block inside a log file.
///
/// - `start_keyword`: first word of the header line right before the data.
/// - `end_keyword`: first word of the line right after the data.
/// - `skip_sections`: number of start keyword occurrences to skip, for noise
///   lines or earlier runs in the same log.
/// - `incomplete`: read the data up to the end of the file, for runs that did
///   not finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOptions {
    pub start_keyword: String,
    pub end_keyword: String,
    pub skip_sections: usize,
    pub incomplete: bool,
}

impl Default for SectionOptions {
    fn default() -> Self {
        SectionOptions {
            start_keyword: "Step".to_string(),
            end_keyword: "Loop".to_string(),
            skip_sections: 0,
            incomplete: false,
        }
    }
}

impl SectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.start_keyword = keyword.into();
        self
    }

    pub fn end_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.end_keyword = keyword.into();
        self
    }

    pub fn skip_sections(mut self, count: usize) -> Self {
        self.skip_sections = count;
        self
    }

    pub fn incomplete(mut self, incomplete: bool) -> Self {
        self.incomplete = incomplete;
        self
    }
}

/// Line indices delimiting the selected block. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Section {
    header: usize,
    end: usize,
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

fn locate<S: AsRef<str>>(lines: &[S], options: &SectionOptions) -> Result<Section> {
    let mut found_sections = 0;
    let mut header_index: Option<usize> = None;
    let mut end_index: Option<usize> = None;
    let mut ignored_end: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let Some(token) = first_token(line.as_ref()) else {
            continue;
        };

        if header_index.is_some() && token == options.end_keyword {
            if options.incomplete {
                if ignored_end.is_none() {
                    ignored_end = Some(i);
                }
            } else {
                end_index = Some(i);
                break;
            }
        }

        if token == options.start_keyword {
            found_sections += 1;
            if found_sections > options.skip_sections && header_index.is_none() {
                header_index = Some(i);
            }
        }
    }

    let header = header_index.ok_or_else(|| ThermoError::KeywordNotFound {
        keyword: options.start_keyword.clone(),
        suggest_incomplete: false,
    })?;

    let end = if options.incomplete {
        if let Some(line) = ignored_end {
            warn!(
                "end keyword `{}` found at line {line} but incomplete mode reads to the end of the file",
                options.end_keyword
            );
        }
        lines.len()
    } else {
        end_index.ok_or_else(|| ThermoError::KeywordNotFound {
            keyword: options.end_keyword.clone(),
            suggest_incomplete: true,
        })?
    };

    debug!("thermo header at line {header}, data ends before line {end}");
    Ok(Section { header, end })
}

fn parse_row(line: &str, index: usize, n_columns: usize, out: &mut Vec<f64>) -> Result<()> {
    let found = line.split_whitespace().count();
    if found != n_columns {
        return Err(ThermoError::MalformedRow {
            line: index,
            defect: RowDefect::FieldCount {
                expected: n_columns,
                found,
            },
        });
    }

    for token in line.split_whitespace() {
        let value = token.parse::<f64>().map_err(|_| ThermoError::MalformedRow {
            line: index,
            defect: RowDefect::NotNumeric(token.to_string()),
        })?;
        out.push(value);
    }
    Ok(())
}

/// Extract a single block of thermo data from the `lines` of a log file.
///
/// The header is the `skip_sections + 1`-th line starting with the start
/// keyword. The data runs until the first following line starting with the end
/// keyword, or until the end of `lines` in incomplete mode. End keyword lines
/// before the header are ignored.
///
/// # Errors
///
/// Returns [`ThermoError::KeywordNotFound`] when either keyword is missing,
/// [`ThermoError::EmptyDataBlock`] when there are no rows between the header
/// and the terminator, and [`ThermoError::MalformedRow`] when a row does not
/// have one number per header entry.
pub fn extract<S: AsRef<str>>(
    lines: &[S],
    options: &SectionOptions,
) -> Result<(HeaderMap, DMatrix<f64>)> {
    let section = locate(lines, options)?;

    let header = HeaderMap::from_tokens(lines[section.header].as_ref().split_whitespace());
    let n_columns = header.len();

    let rows = &lines[section.header + 1..section.end];
    if rows.is_empty() {
        return Err(ThermoError::EmptyDataBlock {
            header_line: section.header,
        });
    }

    let mut values = Vec::with_capacity(rows.len() * n_columns);
    for (offset, line) in rows.iter().enumerate() {
        parse_row(
            line.as_ref(),
            section.header + 1 + offset,
            n_columns,
            &mut values,
        )?;
    }

    let data = DMatrix::from_row_slice(rows.len(), n_columns, &values);
    info!(
        "extracted {} rows of {} thermo properties",
        data.nrows(),
        data.ncols()
    );
    Ok((header, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const SIMPLE: [&str; 4] = ["Step Temp", "0 300.0", "1 301.2", "Loop time info"];

    #[test]
    fn simple_block() {
        let (header, data) = extract(&SIMPLE, &SectionOptions::default()).unwrap();
        assert_eq!(header.names(), vec!["Step", "Temp"]);
        assert_eq!(header.get("Step"), Some(0));
        assert_eq!(header.get("Temp"), Some(1));
        assert_eq!(data.shape(), (2, 2));
        assert_approx_eq!(data[(0, 0)], 0.0);
        assert_approx_eq!(data[(0, 1)], 300.0);
        assert_approx_eq!(data[(1, 0)], 1.0);
        assert_approx_eq!(data[(1, 1)], 301.2);
    }

    #[test]
    fn incomplete_reads_to_end() {
        let options = SectionOptions::default().incomplete(true);
        let (header, data) = extract(&SIMPLE[..3], &options).unwrap();
        assert_eq!(header.len(), data.ncols());
        assert_eq!(data.nrows(), 2);
        assert_approx_eq!(data[(1, 1)], 301.2);
    }

    #[test]
    fn missing_end_suggests_incomplete() {
        let err = extract(&SIMPLE[..3], &SectionOptions::default()).unwrap_err();
        match err {
            ThermoError::KeywordNotFound {
                keyword,
                suggest_incomplete,
            } => {
                assert_eq!(keyword, "Loop");
                assert!(suggest_incomplete);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_start() {
        let lines = ["LAMMPS (29 Oct 2020)", "units real", "Loop time"];
        let err = extract(&lines, &SectionOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ThermoError::KeywordNotFound { ref keyword, suggest_incomplete: false } if keyword == "Step"
        ));
    }

    #[test]
    fn single_row() {
        let lines = ["Step Temp", "0 300.0", "Loop time"];
        let (_, data) = extract(&lines, &SectionOptions::default()).unwrap();
        assert_eq!(data.nrows(), 1);
    }

    #[test]
    fn empty_block() {
        let lines = ["Step Temp", "Loop time"];
        let err = extract(&lines, &SectionOptions::default()).unwrap_err();
        assert!(matches!(err, ThermoError::EmptyDataBlock { header_line: 0 }));

        let options = SectionOptions::default().incomplete(true);
        let err = extract(&lines[..1], &options).unwrap_err();
        assert!(matches!(err, ThermoError::EmptyDataBlock { header_line: 0 }));
    }

    #[test]
    fn skip_sections() {
        let lines = [
            "Step Temp",
            "0 100.0",
            "Loop time of 1.0",
            "Step Temp",
            "0 200.0",
            "Loop time of 1.0",
            "Step Temp Press",
            "0 300.0 1.0",
            "10 310.0 2.0",
            "Loop time of 1.0",
        ];
        let options = SectionOptions::default().skip_sections(2);
        let (header, data) = extract(&lines, &options).unwrap();
        assert_eq!(header.names(), vec!["Step", "Temp", "Press"]);
        assert_eq!(data.shape(), (2, 3));
        assert_approx_eq!(data[(1, 1)], 310.0);

        let options = SectionOptions::default().skip_sections(1);
        let (_, data) = extract(&lines, &options).unwrap();
        assert_eq!(data.shape(), (1, 2));
        assert_approx_eq!(data[(0, 1)], 200.0);

        let options = SectionOptions::default().skip_sections(3);
        assert!(matches!(
            extract(&lines, &options),
            Err(ThermoError::KeywordNotFound { .. })
        ));
    }

    #[test]
    fn end_keyword_before_header_is_ignored() {
        let lines = [
            "Loop over neighbor lists",
            "",
            "Step Temp",
            "0 1.5",
            "Loop time of 2.0",
        ];
        let (_, data) = extract(&lines, &SectionOptions::default()).unwrap();
        assert_eq!(data.shape(), (1, 2));
    }

    #[test]
    fn custom_keywords() {
        let lines = ["# thermo", "Time Step PotEng", "0.0 0 -10.5", "WARNING: done"];
        let options = SectionOptions::default()
            .start_keyword("Time")
            .end_keyword("WARNING:");
        let (header, data) = extract(&lines, &options).unwrap();
        assert_eq!(header.get("PotEng"), Some(2));
        assert_approx_eq!(data[(0, 2)], -10.5);
    }

    #[test]
    fn malformed_rows() {
        let lines = ["Step Temp", "0 300.0", "1", "Loop"];
        let err = extract(&lines, &SectionOptions::default()).unwrap_err();
        match err {
            ThermoError::MalformedRow { line, defect } => {
                assert_eq!(line, 2);
                assert_eq!(
                    defect,
                    RowDefect::FieldCount {
                        expected: 2,
                        found: 1
                    }
                );
            }
            other => panic!("unexpected error {other:?}"),
        }

        let lines = ["Step Temp", "0 abc", "Loop"];
        let err = extract(&lines, &SectionOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ThermoError::MalformedRow { line: 1, defect: RowDefect::NotNumeric(ref t) } if t == "abc"
        ));
    }

    #[test]
    fn blank_line_inside_block_is_malformed() {
        let lines = ["Step Temp", "0 300.0", "", "Loop"];
        let err = extract(&lines, &SectionOptions::default()).unwrap_err();
        assert!(matches!(err, ThermoError::MalformedRow { line: 2, .. }));
    }
}
