use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The fixed set of entity variants the simulation produces.
/// Adding a variant means extending every sprite table in `components::sprite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Box,
    Player,
    Rock,
    Zombie,
}

impl EntityKind {
    /// Convert from the numeric code used by the flat record protocol.
    /// Returns None if the code is out of range.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Box),
            1 => Some(Self::Player),
            2 => Some(Self::Rock),
            3 => Some(Self::Zombie),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Read-only view of a simulated entity, as the renderer consumes it.
/// The simulator owns and mutates the entity; the renderer only reads.
pub trait GridEntity {
    fn kind(&self) -> EntityKind;
    fn health(&self) -> i32;
    /// Position in grid cells (may be fractional).
    fn position(&self) -> DVec2;
}

/// Plain owned entity snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub health: i32,
    pub position: DVec2,
}

impl EntitySnapshot {
    pub fn new(kind: EntityKind, health: i32, x: f64, y: f64) -> Self {
        Self {
            kind,
            health,
            position: DVec2::new(x, y),
        }
    }
}

impl GridEntity for EntitySnapshot {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn position(&self) -> DVec2 {
        self.position
    }
}

/// Per-entity record in the flat `Float32Array` handed over by the host.
/// 4 floats = 16 bytes stride: kind code, health, x, y.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntityRecord {
    pub kind: f32,
    pub health: f32,
    pub x: f32,
    pub y: f32,
}

impl EntityRecord {
    pub const FLOATS: usize = 4;

    /// Decode into a snapshot. Returns None for an unknown kind code.
    pub fn to_snapshot(&self) -> Option<EntitySnapshot> {
        if !(self.kind >= 0.0) {
            return None;
        }
        let kind = EntityKind::from_code(self.kind as u32)?;
        Some(EntitySnapshot::new(
            kind,
            self.health as i32,
            self.x as f64,
            self.y as f64,
        ))
    }
}

/// Reinterpret a flat float buffer as entity records and decode them.
///
/// A trailing partial record or an unknown kind code is logged and skipped;
/// the remaining records are still returned in order.
pub fn decode_records(floats: &[f32]) -> Vec<EntitySnapshot> {
    let whole = floats.len() - floats.len() % EntityRecord::FLOATS;
    if whole != floats.len() {
        log::warn!(
            "entity buffer length {} is not a multiple of {}; ignoring trailing floats",
            floats.len(),
            EntityRecord::FLOATS
        );
    }
    let records: &[EntityRecord] = bytemuck::cast_slice(&floats[..whole]);
    records
        .iter()
        .filter_map(|record| {
            let snapshot = record.to_snapshot();
            if snapshot.is_none() {
                log::warn!("skipping entity record with unknown kind {}", record.kind);
            }
            snapshot
        })
        .collect()
}
