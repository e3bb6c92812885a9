use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extended help shown after `turnero bill --help`.
/// Input failures point here for the row schema.
pub const BILL_AFTER_HELP: &str = "\
How billing works:
  Every kept row is classified as RX, TAC or other. TAC studies are billed
  as simple, double or triple by the number of body regions they cover.
  Hours come from the shift dates you pass with --shift; each date opens
  one overnight shift whose window depends on the weekday.

  <path> is a local JSON or CSV file. Use `-` to read stdin.
  Example: cat april.csv | turnero bill - --shift 2025-04-08 --shift 2025-04-18,F

Shift dates:
  YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY or DD-mmm-YYYY (abr, apr, ...).
  Append `,F` to mark the date as a holiday.
  Holidays Monday to Thursday use the Sunday window; a Friday holiday uses
  the Saturday window.

Input schema:
  JSON example (one top-level array):
  [
    {
      \"scheduled_date\": \"08-abr-2025\",
      \"scheduled_time\": \"21:40\",
      \"procedure_name\": \"TAC DE TORAX, ABDOMEN Y PELVIS\",
      \"acquisition_room\": \"SCA-TAC1\",
      \"appointment_id\": \"A-1034\"
    }
  ]

  CSV example (comma or semicolon delimited, one header row):
  scheduled_date,scheduled_time,procedure_name,acquisition_room,appointment_id
  2025-04-08,21:40,TAC DE CEREBRO,SCA-TAC1,A-1034
  2025-04-08,22:05,RX TORAX AP,SJ-RX2,A-1035

Field rules:
  scheduled_date (required)
  procedure_name (required)
  acquisition_room (required):
    Rooms are kept when they start with an included prefix (SCA, SJ by
    default) and do not start with an excluded one (HOS by default).
  scheduled_time (optional):
    HH:MM or HH:MM:SS. A date cell may also carry the time after a space.
  appointment_id (optional):
    Matched against --force-include to keep rows the filters would drop.

Other columns are ignored.

Attribution:
  By default every kept row is billed. With --by-time only rows whose
  timestamp falls inside one of the chosen shifts are billed.
";

#[derive(Debug, Parser)]
#[command(
    name = "turnero",
    version,
    about = "on-call shift hours and billing for radiology reporting",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify procedure names into exam type, regions and billing category
    #[command(arg_required_else_help = true)]
    Classify {
        /// One or more procedure names (quote names with spaces)
        #[arg(required = true)]
        names: Vec<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the shift window and hours for each date
    #[command(arg_required_else_help = true)]
    Shifts {
        /// Shift dates; append `,F` for a holiday (e.g. 2025-04-18,F)
        #[arg(required = true)]
        dates: Vec<String>,
        /// Read config from this TOML file instead of the home config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Suggest likely shift dates from daily exam volume
    #[command(arg_required_else_help = true)]
    Estimate {
        /// Path to a JSON or CSV row file (use `-` for stdin)
        path: String,
        /// Keep rows dated on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Keep rows dated on or before this date
        #[arg(long)]
        to: Option<String>,
        /// Read config from this TOML file instead of the home config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Compute the billing result for a set of shifts
    #[command(arg_required_else_help = true, after_long_help = BILL_AFTER_HELP)]
    Bill {
        /// Path to a JSON or CSV row file (use `-` for stdin)
        path: String,
        /// Shift date worked; repeat for each shift, append `,F` for a holiday
        #[arg(long = "shift", value_name = "DATE", required = true)]
        shifts: Vec<String>,
        /// Appointment id to keep even when room or date filters drop it
        #[arg(long = "force-include", value_name = "ID")]
        force_include: Vec<String>,
        /// Keep rows dated on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Keep rows dated on or before this date
        #[arg(long)]
        to: Option<String>,
        /// Bill only rows whose timestamp falls inside a chosen shift
        #[arg(long)]
        by_time: bool,
        /// Read config from this TOML file instead of the home config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
