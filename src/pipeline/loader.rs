//! Read deals and timeline entries from JSON
//!
//! This is where malformed pipeline data is rejected: unparsable dates and
//! months fail deserialization, and every deal is validated before it is
//! handed to the engine.

use super::{Deal, TimelineEntry};
use crate::error::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load deals from a JSON array
pub fn load_deals_from_reader<R: Read>(reader: R) -> Result<Vec<Deal>> {
    let deals: Vec<Deal> = serde_json::from_reader(reader)?;
    for deal in &deals {
        deal.validate()?;
    }
    Ok(deals)
}

/// Load deals from a JSON file
pub fn load_deals<P: AsRef<Path>>(path: P) -> Result<Vec<Deal>> {
    let path = path.as_ref();
    let deals = load_deals_from_reader(BufReader::new(File::open(path)?))?;
    info!("Loaded {} deals from {}", deals.len(), path.display());
    Ok(deals)
}

/// Load standalone timeline entries from a JSON array
pub fn load_timeline_from_reader<R: Read>(reader: R) -> Result<Vec<TimelineEntry>> {
    let entries: Vec<TimelineEntry> = serde_json::from_reader(reader)?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

pub fn load_timeline<P: AsRef<Path>>(path: P) -> Result<Vec<TimelineEntry>> {
    let path = path.as_ref();
    let entries = load_timeline_from_reader(BufReader::new(File::open(path)?))?;
    info!("Loaded {} timeline entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Attach stored timeline entries to their deals
///
/// Deals that already embed entries keep them. Entries pointing at deals not
/// in `deals` are dropped. Returns the number of entries attached.
pub fn attach_timeline(deals: &mut [Deal], entries: Vec<TimelineEntry>) -> usize {
    let mut by_deal: HashMap<String, Vec<TimelineEntry>> = HashMap::new();
    for entry in entries {
        by_deal.entry(entry.deal_id.clone()).or_default().push(entry);
    }

    let mut attached = 0;
    for deal in deals.iter_mut() {
        let Some(group) = by_deal.remove(&deal.id) else {
            continue;
        };
        if deal.timeline.is_empty() {
            attached += group.len();
            deal.timeline = group;
        } else {
            debug!("Deal {} already has {} embedded entries", deal.id, deal.timeline.len());
        }
    }

    let orphaned: usize = by_deal.values().map(Vec::len).sum();
    if orphaned > 0 {
        debug!("Ignored {} timeline entries for unknown deals", orphaned);
    }
    attached
}
