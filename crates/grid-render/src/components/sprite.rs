use glam::DVec2;
use crate::api::types::EntityKind;
use crate::assets::manifest::ImageId;
use crate::assets::store::{AssetSet, AssetStore};

/// Two-state classification of an entity's health.
/// Only meaningful for zombies: exactly 1 HP left is `Hit`, anything else is `Alive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthBucket {
    Alive,
    Hit,
}

impl HealthBucket {
    pub fn from_health(health: i32) -> Self {
        if health == 1 {
            HealthBucket::Hit
        } else {
            HealthBucket::Alive
        }
    }
}

/// Visual variant of an entity: its kind plus, for zombies, the health bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Box,
    Player,
    Rock,
    ZombieAlive,
    ZombieHit,
}

/// Hand-tuned placement of a sprite inside its grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteGeometry {
    /// Pixel nudge applied after centering in the cell.
    pub offset: DVec2,
    /// Width and height as a fraction of one cell, from the source art's aspect ratio.
    pub ratio: DVec2,
}

impl SpriteKey {
    pub fn resolve(kind: EntityKind, health: i32) -> Self {
        match (kind, HealthBucket::from_health(health)) {
            (EntityKind::Box, _) => SpriteKey::Box,
            (EntityKind::Player, _) => SpriteKey::Player,
            (EntityKind::Rock, _) => SpriteKey::Rock,
            (EntityKind::Zombie, HealthBucket::Alive) => SpriteKey::ZombieAlive,
            (EntityKind::Zombie, HealthBucket::Hit) => SpriteKey::ZombieHit,
        }
    }

    pub fn image(self) -> ImageId {
        match self {
            SpriteKey::Box => ImageId::Box,
            SpriteKey::Player => ImageId::Player,
            SpriteKey::Rock => ImageId::Rock,
            SpriteKey::ZombieAlive => ImageId::ZombieAlive,
            SpriteKey::ZombieHit => ImageId::ZombieHit,
        }
    }

    /// Geometry table. Values match the source sprites and must not be re-derived.
    pub const fn geometry(self) -> SpriteGeometry {
        match self {
            SpriteKey::Box => entry(0.0, 0.0, 0.87, 1.0),
            SpriteKey::Player => entry(0.0, 0.0, 1.0, 1.0),
            SpriteKey::Rock => entry(0.0, 0.0, 1.0, 0.76),
            SpriteKey::ZombieAlive => entry(14.0, 0.0, 1.0, 1.0),
            SpriteKey::ZombieHit => entry(-2.0, 0.0, 0.61, 1.0),
        }
    }
}

const fn entry(dx: f64, dy: f64, rw: f64, rh: f64) -> SpriteGeometry {
    SpriteGeometry {
        offset: DVec2::new(dx, dy),
        ratio: DVec2::new(rw, rh),
    }
}

/// Everything needed to draw one entity. Computed per draw, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDescriptor<I> {
    pub image: I,
    pub offset: DVec2,
    pub ratio: DVec2,
}

/// Image handle for an entity, or None while the store has not loaded.
pub fn resolve_image<I: Clone>(store: &AssetStore<I>, kind: EntityKind, health: i32) -> Option<I> {
    store.image(SpriteKey::resolve(kind, health).image())
}

pub fn resolve_offset(kind: EntityKind, health: i32) -> DVec2 {
    SpriteKey::resolve(kind, health).geometry().offset
}

pub fn resolve_ratio(kind: EntityKind, health: i32) -> DVec2 {
    SpriteKey::resolve(kind, health).geometry().ratio
}

/// Full descriptor for an entity, or None while its image is absent.
pub fn resolve<I: Clone>(store: &AssetStore<I>, kind: EntityKind, health: i32) -> Option<SpriteDescriptor<I>> {
    let key = SpriteKey::resolve(kind, health);
    let image = store.image(key.image())?;
    let SpriteGeometry { offset, ratio } = key.geometry();
    Some(SpriteDescriptor { image, offset, ratio })
}

/// Descriptor borrowing its image from an already published set.
pub fn describe<I>(set: &AssetSet<I>, kind: EntityKind, health: i32) -> SpriteDescriptor<&I> {
    let key = SpriteKey::resolve(kind, health);
    let SpriteGeometry { offset, ratio } = key.geometry();
    SpriteDescriptor {
        image: set.get(key.image()),
        offset,
        ratio,
    }
}
