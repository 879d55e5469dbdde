//! Convert latitude/longitude to US National Grid references, and back.
//!
//! ```sh
//! echo 44.876 -93.12456789 | usng --precision 4
//! echo vk 1234 5678 | usng --inv --reference 44,-93
//! ```
use clap::Parser;
use log::{debug, error, trace};
use std::io::{BufRead, BufReader};
use usng::prelude::*;

/// USNG: Conversion between geographical coordinates and US National Grid
/// (MGRS) references. Reads from the files given, or from stdin when none.
/// Blank lines, and lines starting with '#', are skipped.
#[derive(Parser, Debug)]
#[clap(name = "usng")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Inverse operation: From grid references to latitude/longitude
    #[clap(long = "inv")]
    inverse: bool,

    /// Number of digits per coordinate in the grid references
    #[clap(short, long, default_value_t = 5)]
    precision: usize,

    /// Location (LAT,LON) used for resolving truncated grid references
    #[clap(short, long, allow_hyphen_values = true)]
    reference: Option<String>,

    /// Reject grid references pointing outside of their zone or band
    #[clap(short, long)]
    strict: bool,

    /// Output the corners and center of the grid cell, rather than its
    /// south west corner
    #[clap(long)]
    square: bool,

    /// Number of decimals for latitudes and longitudes
    #[clap(short = 'd', long, default_value_t = 7)]
    decimals: usize,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on
    args: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("{options:#?}");

    let usng = Usng::new()?;
    let reference = match &options.reference {
        Some(text) => Some(parse_reference(text)?),
        None => None,
    };

    let mut sources: Vec<Box<dyn BufRead>> = Vec::new();
    if options.args.is_empty() {
        sources.push(Box::new(BufReader::new(std::io::stdin())));
    }
    for name in &options.args {
        debug!("Reading {name}");
        let file = std::fs::File::open(name)?;
        sources.push(Box::new(BufReader::new(file)));
    }

    for source in sources {
        for line in source.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(e) = convert(&usng, &options, reference, line) {
                error!("{line}: {e}");
            }
        }
    }
    Ok(())
}

// A single line of input, in either direction
fn convert(
    usng: &Usng,
    options: &Cli,
    reference: Option<Coor2D>,
    line: &str,
) -> Result<(), anyhow::Error> {
    let d = options.decimals;

    if !options.inverse {
        let point = parse_reference(line)?;
        println!("{}", usng.from_lonlat(point, options.precision)?);
        return Ok(());
    }

    if options.square {
        let square = usng.to_square(line, reference)?;
        println!("# {line}: {}", square.precision);
        for (name, corner) in [
            ("sw", square.sw),
            ("nw", square.nw),
            ("ne", square.ne),
            ("se", square.se),
            ("center", square.center),
        ] {
            println!("{:.d$} {:.d$} {name}", corner.latitude(), corner.longitude());
        }
        return Ok(());
    }

    let location = usng.to_lonlat(line, reference, options.strict)?;
    println!(
        "{:.d$} {:.d$} {} {}",
        location.latitude(),
        location.longitude(),
        location.precision,
        location.usng
    );
    Ok(())
}

// "LAT,LON" or "LAT LON", in degrees
fn parse_reference(text: &str) -> Result<Coor2D, anyhow::Error> {
    let numbers = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<f64>, _>>()?;
    let [latitude, longitude] = numbers.as_slice() else {
        anyhow::bail!("expected latitude and longitude, got '{text}'");
    };
    Ok(Coor2D::geo(*latitude, *longitude))
}
