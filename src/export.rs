//! JSON report of the detected beats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    error::ExportError,
    results::{Intervals, Peaks},
};

#[derive(Serialize)]
struct Report<'a> {
    peaks: PeakReport<'a>,
    intervals: IntervalReport,
}

#[derive(Serialize)]
struct PeakReport<'a> {
    #[serde(rename = "R")]
    r: &'a [usize],
}

#[derive(Serialize)]
struct IntervalReport {
    #[serde(rename = "RR")]
    rr: Vec<f64>,
}

/// Two decimal places, as written in the report.
fn centiseconds(rr: f64) -> f64 {
    (rr * 100.0).round() / 100.0
}

pub fn to_json_writer(
    writer: impl Write,
    peaks: &Peaks,
    intervals: &Intervals,
) -> Result<(), ExportError> {
    let report = Report {
        peaks: PeakReport {
            r: peaks.as_slice(),
        },
        intervals: IntervalReport {
            rr: intervals.as_slice().iter().copied().map(centiseconds).collect(),
        },
    };

    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

pub fn write_json(
    path: impl AsRef<Path>,
    peaks: &Peaks,
    intervals: &Intervals,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut writer = BufWriter::with_capacity(1 << 20, File::create(path)?);
    to_json_writer(&mut writer, peaks, intervals)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::info!("Results written to {}", path.display());
    Ok(())
}
