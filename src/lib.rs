//! Extract thermodynamic data from LAMMPS log files.
//!
//! A log is scanned for a block of numeric rows between a header line (for
//! example `Step Temp Press`) and a terminating line (for example
//! `Loop time of ...`). The block is exposed as a [`ThermoTable`] that can be
//! queried by property name and by time or step range, and saved to a bincode
//! or npz container for faster reloading.
//!
//! ```no_run
//! use lammps_thermo::{load, Bounds, SectionOptions};
//! use std::path::Path;
//!
//! let options = SectionOptions::default().skip_sections(1);
//! let table = load(Path::new("log.lammps"), &options)?;
//! let temp = table.query(&["Step", "Temp"], None, Some(Bounds::at_least(1000.0)))?;
//! println!("{} rows", temp.nrows());
//! table.save("thermo.npz")?;
//! # Ok::<(), lammps_thermo::error::ThermoError>(())
//! ```

pub mod error;
pub mod extractor;
pub mod format;
pub mod formats;
pub mod header;
pub mod table;

pub use error::{Result, ThermoError};
pub use extractor::{extract, SectionOptions};
pub use format::{load, load_with_format, Format};
pub use header::HeaderMap;
pub use table::{Bounds, ThermoTable};
