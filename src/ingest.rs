//! Row-oriented CSV recordings: one lead per line, header line first,
//! first field of every lead line is its label.

use std::{fs::File, io::Read, path::Path};

use crate::{error::IngestError, LEADS, MAX_SAMPLES};

/// Samples of every lead, all of the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct EcgRecord {
    leads: Vec<Vec<f64>>,
    sample_count: usize,
}

impl EcgRecord {
    pub fn lead(&self, idx: usize) -> Option<&[f64]> {
        self.leads.get(idx).map(Vec::as_slice)
    }

    pub fn lead_count(&self) -> usize {
        self.leads.len()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

pub fn read_csv(path: impl AsRef<Path>) -> Result<EcgRecord, IngestError> {
    let path = path.as_ref();
    let record = parse_csv(File::open(path)?)?;

    log::info!(
        "Loaded {} leads of {} samples from {}",
        record.lead_count(),
        record.sample_count(),
        path.display()
    );
    Ok(record)
}

/// Parse a recording from any source.
///
/// Fields that are not numbers are skipped. Leads past [`LEADS`] and samples
/// past [`MAX_SAMPLES`] are ignored. The first lead fixes the sample count;
/// the others are truncated or zero-padded to it.
pub fn parse_csv(source: impl Read) -> Result<EcgRecord, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut leads = Vec::new();
    for result in reader.records().take(LEADS) {
        let record = result?;
        leads.push(parse_lead(&record));
    }

    let sample_count = leads.first().map_or(0, Vec::len);
    if sample_count == 0 {
        return Err(IngestError::NoData);
    }

    for lead in leads.iter_mut() {
        if lead.len() != sample_count {
            log::debug!(
                "Lead of {} samples resized to {sample_count}",
                lead.len()
            );
        }
        lead.resize(sample_count, 0.0);
    }

    Ok(EcgRecord {
        leads,
        sample_count,
    })
}

fn parse_lead(record: &csv::StringRecord) -> Vec<f64> {
    record
        .iter()
        .skip(1)
        .filter_map(|field| field.parse::<f64>().ok())
        .take(MAX_SAMPLES)
        .collect()
}
