//! Grouping of occurrences into rewrite clauses and their rendering.

use super::location::{format_location, group_locations, Location};
use super::phonology::{Coda, Particle};
use super::scanner::Occurrence;

/// Composite key shared by every occurrence that rewrites the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseKey {
    pub matched_chunk: String,
    pub replacement_chunk: String,
    pub particle: Option<Particle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseGroup {
    pub key: ClauseKey,
    pub locations: Vec<Location>,
}

impl ClauseGroup {
    /// Locations with duplicates removed, in first-seen order.
    pub fn deduped_locations(&self) -> Vec<&Location> {
        let mut seen: Vec<&Location> = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            if !seen.contains(&location) {
                seen.push(location);
            }
        }
        seen
    }
}

/// Render the rewrite sentence for one chunk.
///
/// Without a particle: `"정의"를 "개념"으로 한다.`, with 을/를 and 으로/로
/// agreeing with the quoted word they follow. With a particle the original
/// keeps it outside the quotes and the replacement takes the particle's
/// rule-table form: `"시장"은 "도지사"는 한다.`
pub fn apply_particle_rule(original: &str, replacement: &str, particle: Option<Particle>) -> String {
    let replacement_coda = Coda::of(replacement);
    match particle {
        None => format!(
            "\"{}\"{} \"{}\"{} 한다.",
            original,
            Coda::of(original).object_marker(),
            replacement,
            replacement_coda.instrumental_marker(),
        ),
        Some(particle) => format!(
            "\"{}\"{} \"{}\"{} 한다.",
            original,
            particle,
            replacement,
            particle.replacement_form(replacement_coda),
        ),
    }
}

/// Bucket occurrences by their clause key, keeping first-appearance order.
pub fn group(occurrences: Vec<Occurrence>) -> Vec<ClauseGroup> {
    let mut groups: Vec<ClauseGroup> = Vec::new();

    for occurrence in occurrences {
        let key = ClauseKey {
            matched_chunk: occurrence.matched_chunk,
            replacement_chunk: occurrence.replacement_chunk,
            particle: occurrence.particle,
        };
        match groups.iter_mut().find(|g| g.key == key) {
            Some(existing) => existing.locations.push(occurrence.location),
            None => groups.push(ClauseGroup {
                key,
                locations: vec![occurrence.location],
            }),
        }
    }

    groups
}

/// `"{citation} 중 {rewrite}"` for one group.
pub fn render_group(group: &ClauseGroup) -> String {
    let citations: Vec<String> = group
        .deduped_locations()
        .into_iter()
        .map(format_location)
        .collect();

    format!(
        "{} 중 {}",
        group_locations(&citations),
        apply_particle_rule(
            &group.key.matched_chunk,
            &group.key.replacement_chunk,
            group.key.particle
        )
    )
}
