//! 配置管理模块
//!
//! 提供引擎配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//!
//! [terrain]
//! heightmap = "assets/terrain.raw"
//! height_divisor = 3.0
//! sampler = "bezier"  # 或 "linear"
//!
//! [camera]
//! radius = 10.0
//! fov_y = 0.785398
//! near = 0.1
//! far = 1000.0
//!
//! [player]
//! speed = 10.0
//!
//! [shadow]
//! width = 1024
//! height = 1024
//!
//! [frame]
//! frames = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 引擎配置
///
/// 包含了引擎运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口（视口）配置，只用于计算投影的宽高比
    #[serde(default)]
    pub window: WindowConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 地形配置
    #[serde(default)]
    pub terrain: TerrainConfig,

    /// 相机配置
    #[serde(default)]
    pub camera: CameraConfig,

    /// 玩家配置
    #[serde(default)]
    pub player: PlayerConfig,

    /// 阴影贴图配置
    #[serde(default)]
    pub shadow: ShadowConfig,

    /// 帧循环配置
    #[serde(default)]
    pub frame: FrameConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// 地形高度查询方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerKind {
    /// 与曲面细分阶段一致的四次 Bernstein 面片
    Bezier,
    /// 逐格三角形线性插值
    Linear,
}

/// 地形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// 高度图路径（每字节一个采样）
    #[serde(default = "default_heightmap")]
    pub heightmap: String,

    /// 采样值除以该因子得到高度
    #[serde(default = "default_height_divisor")]
    pub height_divisor: f32,

    /// 高度查询方式
    #[serde(default = "default_sampler")]
    pub sampler: SamplerKind,
}

/// 相机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 第三人称相机到目标的距离
    #[serde(default = "default_radius")]
    pub radius: f32,

    /// 垂直视野（弧度）
    #[serde(default = "default_fov_y")]
    pub fov_y: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near")]
    pub near: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far")]
    pub far: f32,
}

/// 玩家配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// 移动速度（单位/秒）
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 是否贴合地形高度
    #[serde(default = "default_clamp_to_terrain")]
    pub clamp_to_terrain: bool,
}

/// 阴影贴图配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowConfig {
    #[serde(default = "default_shadow_size")]
    pub width: u32,

    #[serde(default = "default_shadow_size")]
    pub height: u32,
}

/// 帧循环配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// 运行的帧数
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// 固定时间步长（秒）；为 0 时使用真实计时
    #[serde(default)]
    pub fixed_delta: f32,
}

// 默认值函数
fn default_width() -> u32 { 1280 }
fn default_height() -> u32 { 720 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "terrain_scene.log".to_string() }
fn default_heightmap() -> String { "assets/terrain.raw".to_string() }
fn default_height_divisor() -> f32 { 3.0 }
fn default_sampler() -> SamplerKind { SamplerKind::Bezier }
fn default_radius() -> f32 { 10.0 }
fn default_fov_y() -> f32 { 0.25 * std::f32::consts::PI }
fn default_near() -> f32 { 0.1 }
fn default_far() -> f32 { 1000.0 }
fn default_speed() -> f32 { 10.0 }
fn default_clamp_to_terrain() -> bool { true }
fn default_shadow_size() -> u32 { 1024 }
fn default_frames() -> u32 { 120 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: default_heightmap(),
            height_divisor: default_height_divisor(),
            sampler: default_sampler(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            fov_y: default_fov_y(),
            near: default_near(),
            far: default_far(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            clamp_to_terrain: default_clamp_to_terrain(),
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            width: default_shadow_size(),
            height: default_shadow_size(),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            fixed_delta: 0.0,
        }
    }
}

impl WindowConfig {
    /// 视口宽高比
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// ```no_run
    /// use terrain_scene::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), terrain_scene::core::TerrainSceneError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.as_ref().display(), "Loaded engine config");
                config
            }
            Err(e) => {
                tracing::warn!("{}, using default engine config", e);
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--frames <n>`: 运行的帧数
    /// - `--heightmap <path>`: 高度图路径
    /// - `--sampler <bezier|linear>`: 高度查询方式
    /// - `--width <value>` / `--height <value>`: 视口尺寸
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
                .cloned()
        };

        if let Some(frames) = value_of("--frames").and_then(|s| s.parse().ok()) {
            self.frame.frames = frames;
        }

        if let Some(path) = value_of("--heightmap") {
            self.terrain.heightmap = path;
        }

        match value_of("--sampler").as_deref() {
            Some("bezier") => self.terrain.sampler = SamplerKind::Bezier,
            Some("linear") => self.terrain.sampler = SamplerKind::Linear,
            Some(other) => tracing::warn!(sampler = other, "Unknown sampler, keeping config value"),
            None => {}
        }

        if let Some(width) = value_of("--width").and_then(|s| s.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = value_of("--height").and_then(|s| s.parse().ok()) {
            self.window.height = height;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window.width/height", "Window dimensions must be greater than 0"));
        }

        let divisor = self.terrain.height_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(invalid("terrain.height_divisor", "Height divisor must be a positive number"));
        }

        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(invalid("camera.near/far", "Clip planes must satisfy 0 < near < far"));
        }

        if !(self.camera.fov_y > 0.0 && self.camera.fov_y < std::f32::consts::PI) {
            return Err(invalid("camera.fov_y", "Field of view must be in (0, pi)"));
        }

        if self.camera.radius <= 0.0 {
            return Err(invalid("camera.radius", "Camera radius must be greater than 0"));
        }

        if self.shadow.width == 0 || self.shadow.height == 0 {
            return Err(invalid("shadow.width/height", "Shadow map dimensions must be greater than 0"));
        }

        if self.frame.fixed_delta < 0.0 {
            return Err(invalid("frame.fixed_delta", "Fixed delta must not be negative"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> super::error::TerrainSceneError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.terrain.height_divisor, 3.0);
        assert_eq!(config.terrain.sampler, SamplerKind::Bezier);
        assert_eq!(config.shadow.width, 1024);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.terrain.height_divisor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["terrain_scene", "--frames", "3", "--sampler", "linear", "--heightmap", "a.raw"]);
        assert_eq!(config.frame.frames, 3);
        assert_eq!(config.terrain.sampler, SamplerKind::Linear);
        assert_eq!(config.terrain.heightmap, "a.raw");
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("[terrain]\nsampler = \"linear\"\n").unwrap();
        assert_eq!(config.terrain.sampler, SamplerKind::Linear);
        assert_eq!(config.terrain.height_divisor, 3.0);
        assert_eq!(config.camera.radius, 10.0);
    }
}
