//! 场景配置模块
//!
//! 定义场景内容的布局：网格资源路径、地形位置、草地分布、太阳参数和聚光灯阵列。
//! 与引擎配置 (`Config`) 分离，放在 `scene.toml` 中。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, TerrainSceneError};
use crate::math::Vector3;

/// 网格资源路径
///
/// 路径不存在时使用内置的立方体 / 天空盒 / 公告板网格。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetConfig {
    /// 带纹理坐标的立方体网格（`TextureVertex`）
    #[serde(default)]
    pub cube_mesh: Option<String>,

    /// 天空盒网格（`Vertex`）
    #[serde(default)]
    pub skybox_mesh: Option<String>,

    /// 草地公告板网格（`TextureVertex`，点列表）
    #[serde(default)]
    pub billboard_mesh: Option<String>,
}

/// 地形放置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainPlacement {
    /// 地形原点在世界空间中的位置
    #[serde(default = "default_terrain_position")]
    pub position: [f32; 3],
}

/// 草地分布
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrassConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// 在 [-extent, extent] 的整数网格上放置
    #[serde(default = "default_grass_extent")]
    pub extent: i32,

    #[serde(default = "default_grass_step")]
    pub step: i32,

    /// 轮流使用的纹理数量
    #[serde(default = "default_grass_textures")]
    pub texture_count: u32,
}

/// 太阳
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunConfig {
    #[serde(default = "default_sun_strength")]
    pub strength: [f32; 3],

    #[serde(default = "default_sun_radius")]
    pub radius: f32,

    /// 俯仰角的变化速度（弧度/秒），0 表示静止
    #[serde(default)]
    pub angular_speed: f32,
}

/// 绕自身旋转、驱动聚光灯的立方体阵列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotGridConfig {
    #[serde(default = "default_spot_min")]
    pub min: [i32; 3],

    #[serde(default = "default_spot_max")]
    pub max: [i32; 3],

    #[serde(default = "default_spot_step")]
    pub step: i32,

    #[serde(default = "default_spot_strength")]
    pub strength: [f32; 3],

    #[serde(default = "default_spot_direction")]
    pub direction: [f32; 3],

    #[serde(default = "default_spot_fall_off_start")]
    pub fall_off_start: f32,

    #[serde(default = "default_spot_fall_off_end")]
    pub fall_off_end: f32,

    #[serde(default = "default_spot_power")]
    pub spot_power: f32,

    #[serde(default = "default_spot_texture")]
    pub texture_index: u32,
}

/// 场景包围球，用于阴影视锥拟合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsConfig {
    #[serde(default)]
    pub center: [f32; 3],

    #[serde(default = "default_bounds_radius")]
    pub radius: f32,
}

/// 场景配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub assets: AssetConfig,

    #[serde(default)]
    pub terrain: TerrainPlacement,

    #[serde(default)]
    pub grass: GrassConfig,

    #[serde(default)]
    pub sun: SunConfig,

    #[serde(default)]
    pub spot_lights: SpotGridConfig,

    #[serde(default)]
    pub bounds: BoundsConfig,

    /// 玩家初始位置
    #[serde(default)]
    pub player_start: [f32; 3],
}

fn default_true() -> bool { true }
fn default_terrain_position() -> [f32; 3] { [0.0, -30.0, 0.0] }
fn default_grass_extent() -> i32 { 127 }
fn default_grass_step() -> i32 { 1 }
fn default_grass_textures() -> u32 { 4 }
fn default_sun_strength() -> [f32; 3] { [1.3, 1.2, 1.2] }
fn default_sun_radius() -> f32 { 80.0 }
fn default_spot_min() -> [i32; 3] { [-10, 0, -10] }
fn default_spot_max() -> [i32; 3] { [10, 20, 10] }
fn default_spot_step() -> i32 { 5 }
fn default_spot_strength() -> [f32; 3] { [0.7, 0.7, 0.7] }
fn default_spot_direction() -> [f32; 3] { [1.0, 0.0, 0.0] }
fn default_spot_fall_off_start() -> f32 { 1.0 }
fn default_spot_fall_off_end() -> f32 { 50.0 }
fn default_spot_power() -> f32 { 80.0 }
fn default_spot_texture() -> u32 { 1 }
fn default_bounds_radius() -> f32 { 128.5 * std::f32::consts::SQRT_2 }

impl Default for TerrainPlacement {
    fn default() -> Self {
        Self { position: default_terrain_position() }
    }
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extent: default_grass_extent(),
            step: default_grass_step(),
            texture_count: default_grass_textures(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            strength: default_sun_strength(),
            radius: default_sun_radius(),
            angular_speed: 0.0,
        }
    }
}

impl Default for SpotGridConfig {
    fn default() -> Self {
        Self {
            min: default_spot_min(),
            max: default_spot_max(),
            step: default_spot_step(),
            strength: default_spot_strength(),
            direction: default_spot_direction(),
            fall_off_start: default_spot_fall_off_start(),
            fall_off_end: default_spot_fall_off_end(),
            spot_power: default_spot_power(),
            texture_index: default_spot_texture(),
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            radius: default_bounds_radius(),
        }
    }
}

impl SpotGridConfig {
    /// 按 x → y → z 的嵌套顺序列出阵列中每个灯的位置
    pub fn positions(&self) -> Vec<Vector3> {
        let step = self.step.max(1) as usize;
        let mut positions = Vec::new();
        for x in (self.min[0]..=self.max[0]).step_by(step) {
            for y in (self.min[1]..=self.max[1]).step_by(step) {
                for z in (self.min[2]..=self.max[2]).step_by(step) {
                    positions.push(Vector3::new(x as f32, y as f32, z as f32));
                }
            }
        }
        positions
    }
}

impl GrassConfig {
    /// 按 x 外层、z 内层的顺序列出每株草的 (x, z)
    pub fn placements(&self) -> Vec<(f32, f32)> {
        if !self.enabled || self.extent < 0 {
            return Vec::new();
        }
        let step = self.step.max(1) as usize;
        let mut placements = Vec::new();
        for x in (-self.extent..=self.extent).step_by(step) {
            for z in (-self.extent..=self.extent).step_by(step) {
                placements.push((x as f32, z as f32));
            }
        }
        placements
    }
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TerrainSceneError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            )))
        })?;

        toml::from_str(&contents).map_err(|e| {
            TerrainSceneError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            )))
        })
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self).map_err(|e| {
            TerrainSceneError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            )))
        })?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }
}
