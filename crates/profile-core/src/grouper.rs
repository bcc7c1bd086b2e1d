use crate::record::RawRecord;
use std::collections::HashMap;

/// Records sharing one (actor, intensity) key, ordered by time then stage.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGroup {
    pub actor: u32,
    pub intensity: f64,
    pub records: Vec<RawRecord>,
}

/// Partition records by actor, then by exact rounded intensity.
///
/// Actors and intensities appear in order of first occurrence. Inside a
/// group records are sorted by `(time, precedence)`; the sort is stable, so
/// duplicates of the same stage at the same millisecond keep their log order.
pub fn group_records(records: Vec<RawRecord>) -> Vec<IntensityGroup> {
    let mut actors: Vec<(u32, Vec<RawRecord>)> = Vec::new();
    let mut actor_index: HashMap<u32, usize> = HashMap::new();
    for record in records {
        let slot = *actor_index.entry(record.actor).or_insert_with(|| {
            actors.push((record.actor, Vec::new()));
            actors.len() - 1
        });
        actors[slot].1.push(record);
    }

    let mut groups = Vec::new();
    for (actor, actor_records) in actors {
        let mut by_intensity: Vec<IntensityGroup> = Vec::new();
        let mut intensity_index: HashMap<u64, usize> = HashMap::new();
        for record in actor_records {
            let key = intensity_key(record.intensity);
            let slot = *intensity_index.entry(key).or_insert_with(|| {
                by_intensity.push(IntensityGroup {
                    actor,
                    intensity: record.intensity,
                    records: Vec::new(),
                });
                by_intensity.len() - 1
            });
            by_intensity[slot].records.push(record);
        }
        for group in &mut by_intensity {
            group.records.sort_by_key(RawRecord::sort_key);
        }
        groups.extend(by_intensity);
    }
    groups
}

fn intensity_key(intensity: f64) -> u64 {
    (intensity + 0.0).to_bits()
}
