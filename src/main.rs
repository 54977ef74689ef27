use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lammps_thermo::{load, Bounds, SectionOptions, ThermoTable};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Extract thermodynamic data from LAMMPS log files"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    section: SectionArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the number of rows and the available properties.
    Info {
        /// Log file or saved container
        path: PathBuf,
    },
    /// Print selected properties as whitespace separated columns.
    Extract(ExtractArgs),
    /// Save the thermo data to a container chosen by the output extension (.bin, .npz).
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}

/// Where to find the thermo block in a log file.
#[derive(Args, Debug)]
struct SectionArgs {
    /// First word of the header line before the data
    #[arg(long, global = true, default_value = "Step")]
    start_keyword: String,

    /// First word of the line after the data
    #[arg(long, global = true, default_value = "Loop")]
    end_keyword: String,

    /// Number of thermo sections to skip
    #[arg(long, global = true, default_value_t = 0)]
    skip_sections: usize,

    /// Read the data up to the end of the file
    #[arg(long, global = true)]
    incomplete: bool,
}

impl From<&SectionArgs> for SectionOptions {
    fn from(args: &SectionArgs) -> Self {
        SectionOptions::default()
            .start_keyword(args.start_keyword.clone())
            .end_keyword(args.end_keyword.clone())
            .skip_sections(args.skip_sections)
            .incomplete(args.incomplete)
    }
}

#[derive(Args, Debug)]
struct ExtractArgs {
    path: PathBuf,

    /// Property to print, can be repeated. Defaults to all properties
    #[arg(short, long = "property", value_name = "NAME")]
    properties: Vec<String>,

    #[arg(long, value_name = "FLOAT", conflicts_with_all = ["step_start", "step_end"])]
    time_start: Option<f64>,

    #[arg(long, value_name = "FLOAT", conflicts_with_all = ["step_start", "step_end"])]
    time_end: Option<f64>,

    #[arg(long, value_name = "FLOAT")]
    step_start: Option<f64>,

    #[arg(long, value_name = "FLOAT")]
    step_end: Option<f64>,
}

fn range(start: Option<f64>, end: Option<f64>) -> Option<Bounds> {
    (start.is_some() || end.is_some()).then(|| Bounds::new(start, end))
}

fn print_table(table: &ThermoTable, args: &ExtractArgs) -> lammps_thermo::Result<()> {
    let names: Vec<String> = if args.properties.is_empty() {
        table.property_names().into_iter().map(String::from).collect()
    } else {
        args.properties.clone()
    };

    let data = table.query(
        &names,
        range(args.time_start, args.time_end),
        range(args.step_start, args.step_end),
    )?;

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "{}", names.join(" "))?;
    for row in data.row_iter() {
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", values.join(" "))?;
    }
    out.flush()?;
    Ok(())
}

fn run(cli: Cli) -> lammps_thermo::Result<()> {
    let options = SectionOptions::from(&cli.section);
    match cli.command {
        Commands::Info { path } => {
            let table = load(&path, &options)?;
            println!("{}: {} rows", path.display(), table.rows());
            println!("{}", table.property_names().join(" "));
        }
        Commands::Extract(args) => {
            let table = load(&args.path, &options)?;
            print_table(&table, &args)?;
        }
        Commands::Convert { input, output } => {
            let table = load(&input, &options)?;
            table.save(&output)?;
            println!(
                "saved {} rows of {} properties to {}",
                table.rows(),
                table.columns(),
                output.display()
            );
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
