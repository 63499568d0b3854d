//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, open_service, GlobalOptions};
use campsite::config::OutputFormat as ConfiguredFormat;
use campsite::{DateRange, Reservation, ReservationFilter, ReservationStatus};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "id",
    "site",
    "name",
    "phone",
    "start",
    "end",
    "status",
    "created_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (default: `output_format` from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Filter by site number
    #[arg(long, value_name = "NUMBER")]
    pub site: Option<String>,

    /// Filter by status
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<StatusFilter>,

    /// Filter by text contained in the customer name
    #[arg(long, value_name = "TEXT")]
    pub name: Option<String>,

    /// Only reservations ending on or after this day
    #[arg(long, value_name = "YYYY-MM-DD", requires = "to")]
    pub from: Option<NaiveDate>,

    /// Only reservations starting on or before this day
    #[arg(long, value_name = "YYYY-MM-DD", requires = "from")]
    pub to: Option<NaiveDate>,
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl OutputFormat {
    /// Flag beats configuration; table when neither is set.
    pub fn resolve(flag: Option<Self>, configured: Option<ConfiguredFormat>) -> Self {
        flag.unwrap_or(match configured {
            Some(ConfiguredFormat::Json) => Self::Json,
            Some(ConfiguredFormat::Csv) => Self::Csv,
            Some(ConfiguredFormat::Tsv) => Self::Tsv,
            Some(ConfiguredFormat::Table) | None => Self::Table,
        })
    }
}

/// Reservation status accepted by `--status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// Active reservations
    Confirmed,
    /// Cancelled before the day of arrival
    Cancelled,
    /// Cancelled on the day of arrival
    CancelledSameDay,
}

impl From<StatusFilter> for ReservationStatus {
    fn from(status: StatusFilter) -> Self {
        match status {
            StatusFilter::Confirmed => Self::Confirmed,
            StatusFilter::Cancelled => Self::Cancelled,
            StatusFilter::CancelledSameDay => Self::CancelledSameDay,
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, service) = open_service(global)?;

        let filter = self.filter()?;
        let reservations = service.list(&filter)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match OutputFormat::resolve(self.format, config.output_format) {
            OutputFormat::Table => format_as_table(&mut handle, &reservations)?,
            OutputFormat::Json => format_as_json(&mut handle, &reservations)?,
            OutputFormat::Csv => format_as_delimited(&mut handle, &reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&mut handle, &reservations, b'\t')?,
        }

        Ok(())
    }

    fn filter(&self) -> Result<ReservationFilter, CliError> {
        let mut filter = ReservationFilter::new();
        if let Some(ref site) = self.site {
            filter = filter.with_site_number(site.trim());
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status.into());
        }
        if let Some(ref name) = self.name {
            filter = filter.with_customer_name(name.trim());
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let period = DateRange::new(from, to)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            filter = filter.with_period(period);
        }
        Ok(filter)
    }
}

fn record(r: &Reservation) -> [String; 8] {
    [
        r.id().to_string(),
        r.site().number().to_string(),
        r.customer_name().to_string(),
        r.phone_number().to_string(),
        r.dates().start().to_string(),
        r.dates().end().to_string(),
        r.status().to_string(),
        format_timestamp(r.created_at()),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table(out: &mut impl Write, reservations: &[Reservation]) -> Result<(), CliError> {
    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for res in reservations {
        writeln!(out, "{}", record(res).join("\t"))?;
    }

    Ok(())
}

/// Format reservations as JSON.
///
/// Confirmation codes are never listed.
fn format_as_json(out: &mut impl Write, reservations: &[Reservation]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, reservations)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    writeln!(out)?;
    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(
    out: &mut impl Write,
    reservations: &[Reservation],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for res in reservations {
        writer.write_record(record(res)).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
