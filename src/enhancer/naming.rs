//! Service-name matching for synthesized artifacts.

/// Pick the service whose name agrees with `entity` at the most character positions.
///
/// This is a best-effort heuristic: it counts equal characters at equal
/// positions, so services sharing a long common prefix can mis-match. Ties go
/// to the first candidate in the given order. Returns `None` without candidates.
pub fn best_matching_service<'a>(services: &[&'a str], entity: &str) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;

    for service in services {
        let matches = service
            .chars()
            .zip(entity.chars())
            .filter(|(s, e)| s == e)
            .count();

        if best.map_or(true, |(_, most)| matches > most) {
            best = Some((service, matches));
        }
    }

    best.map(|(service, _)| service)
}

/// Qualify `name` with `service`
pub fn qualified(service: &str, name: &str) -> String {
    format!("{service}.{name}")
}
