use serde::{Deserialize, Serialize};

/// Identifies one of the six images the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Background,
    Box,
    Player,
    Rock,
    ZombieAlive,
    ZombieHit,
}

impl ImageId {
    /// Total number of images in an asset set.
    pub const COUNT: usize = 6;

    /// Every image, in slot order.
    pub const ALL: [ImageId; Self::COUNT] = [
        ImageId::Background,
        ImageId::Box,
        ImageId::Player,
        ImageId::Rock,
        ImageId::ZombieAlive,
        ImageId::ZombieHit,
    ];

    /// Slot index inside an asset set.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Paths of the six images making up an asset set.
/// Defaults point at the bundled sprites; override via the render config JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub background: String,
    #[serde(rename = "box")]
    pub box_: String,
    pub player: String,
    pub rock: String,
    pub zombie_alive: String,
    pub zombie_hit: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            background: "assets/background.png".into(),
            box_: "assets/box.png".into(),
            player: "assets/player.png".into(),
            rock: "assets/rock.png".into(),
            zombie_alive: "assets/zombie.png".into(),
            zombie_hit: "assets/zombie_hit.png".into(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string. Missing entries keep their default path.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Path of the given image.
    pub fn path(&self, id: ImageId) -> &str {
        match id {
            ImageId::Background => &self.background,
            ImageId::Box => &self.box_,
            ImageId::Player => &self.player,
            ImageId::Rock => &self.rock,
            ImageId::ZombieAlive => &self.zombie_alive,
            ImageId::ZombieHit => &self.zombie_hit,
        }
    }
}
