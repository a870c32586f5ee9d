//! Home Assistant entity-id helpers.
//!
//! Entity ids look like `sensor.geyser_charge`: the part before the first
//! `.` is the domain. The hub protocol defines ids this way, so filtering
//! stays a plain string operation.

/// Domain of every entity the widget cares about.
pub const SENSOR_DOMAIN: &str = "sensor";

/// Return the domain prefix of an entity id.
///
/// An id without a `.` is its own domain.
pub fn entity_domain(entity_id: &str) -> &str {
    match entity_id.split_once('.') {
        Some((domain, _)) => domain,
        None => entity_id,
    }
}

/// `true` if `entity_id` belongs to `domain`.
pub fn in_domain(entity_id: &str, domain: &str) -> bool {
    entity_domain(entity_id) == domain
}
