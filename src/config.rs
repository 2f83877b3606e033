//! Configuration for road-map construction and tile selection.
//!
//! Every field has a default, so partial JSON or TOML documents are accepted.
//!
//! ```rust
//! use wayfinder::Config;
//!
//! let config = Config::from_json(r#"{ "tiles": { "depth": 5 } }"#).unwrap();
//! assert_eq!(config.tiles.depth, 5);
//! assert_eq!(config.tiles.tile_size, 256);
//! ```

use crate::error::{Result, WayfinderError};
use crate::highway::DEFAULT_ALLOWED_HIGHWAYS;
use serde::{Deserialize, Serialize};

/// Deepest quadtree the tile index will build.
///
/// The whole tree is built up front: depth `d` holds `(4^(d+1) - 1) / 3`
/// tiles, each owning its image id. Depth 9 is about 350k tiles (tens of
/// MB); every extra level multiplies that by four.
pub const MAX_TILE_DEPTH: u8 = 9;

/// Road-map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// OSM `highway` values accepted by `add_tagged_way`.
    #[serde(default = "Config::default_allowed_highways")]
    pub allowed_highways: Vec<String>,

    /// Drop nodes that have no neighbors when the map is built.
    #[serde(default)]
    pub prune_isolated: bool,

    #[serde(default)]
    pub tiles: TileConfig,
}

/// Layout of the pre-rendered tile pyramid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileConfig {
    /// Number of levels below the root image.
    #[serde(default = "TileConfig::default_depth")]
    pub depth: u8,

    /// Edge length of one tile image in pixels.
    #[serde(default = "TileConfig::default_tile_size")]
    pub tile_size: u32,

    #[serde(default = "TileConfig::default_image_prefix")]
    pub image_prefix: String,

    #[serde(default = "TileConfig::default_image_extension")]
    pub image_extension: String,
}

impl TileConfig {
    const fn default_depth() -> u8 {
        7
    }

    const fn default_tile_size() -> u32 {
        256
    }

    fn default_image_prefix() -> String {
        "img/".to_string()
    }

    fn default_image_extension() -> String {
        ".png".to_string()
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.depth == 0 {
            return Err("Tile depth must be at least 1".to_string());
        }
        if self.depth > MAX_TILE_DEPTH {
            return Err(format!(
                "Tile depth {} exceeds the maximum of {}",
                self.depth, MAX_TILE_DEPTH
            ));
        }
        if self.tile_size == 0 {
            return Err("Tile size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            depth: Self::default_depth(),
            tile_size: Self::default_tile_size(),
            image_prefix: Self::default_image_prefix(),
            image_extension: Self::default_image_extension(),
        }
    }
}

impl Config {
    fn default_allowed_highways() -> Vec<String> {
        DEFAULT_ALLOWED_HIGHWAYS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn with_tiles(mut self, tiles: TileConfig) -> Self {
        self.tiles = tiles;
        self
    }

    pub fn with_allowed_highways<I, S>(mut self, highways: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_highways = highways.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prune_isolated(mut self, prune: bool) -> Self {
        self.prune_isolated = prune;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.tiles.validate()?;

        if self.allowed_highways.iter().any(|h| h.trim().is_empty()) {
            return Err("Allowed highway types cannot be empty strings".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate().map_err(WayfinderError::InvalidConfig)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate().map_err(WayfinderError::InvalidConfig)?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tiles: TileConfig::default(),
            allowed_highways: Self::default_allowed_highways(),
            prune_isolated: false,
        }
    }
}
