//! 错误处理模块
//!
//! 定义了引擎中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每个子系统提供独立的错误枚举（配置、地形、网格、场景）
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;
use std::path::PathBuf;

/// 引擎统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, TerrainSceneError>;

/// 引擎的顶层错误类型
#[derive(Debug)]
pub enum TerrainSceneError {
    /// 配置错误
    Config(ConfigError),

    /// 高度图 / 地形错误
    Terrain(TerrainError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 场景构建与帧数据错误
    Scene(SceneError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 高度图相关的错误
#[derive(Debug)]
pub enum TerrainError {
    /// 高度图文件不存在
    FileNotFound(PathBuf),

    /// 读取高度图失败
    Io { path: PathBuf, source: std::io::Error },

    /// 文件大小不是完全平方数，无法推出网格边长
    NotSquare { len: usize },

    /// 高度图文件为空
    Empty,

    /// 高度缩放因子无效
    InvalidDivisor(f32),
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 缺少文本格式的元素数量
    MissingCount(&'static str),

    /// 元素数量与剩余数据长度无法匹配
    SizeMismatch {
        section: &'static str,
        stride: usize,
        available: usize,
    },

    /// 数据验证失败
    ValidationError(String),
}

/// 场景运行时相关的错误
#[derive(Debug)]
pub enum SceneError {
    /// 光源数量超出着色器数组容量
    LightLimit { kind: &'static str, max: usize },

    /// 上传缓冲区写入越界
    BufferIndex { index: usize, count: usize },

    /// 场景引用了未注册的资源
    MissingResource(String),
}

impl fmt::Display for TerrainSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainSceneError::Config(e) => write!(f, "Configuration error: {}", e),
            TerrainSceneError::Terrain(e) => write!(f, "Terrain error: {}", e),
            TerrainSceneError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            TerrainSceneError::Scene(e) => write!(f, "Scene error: {}", e),
            TerrainSceneError::Io(e) => write!(f, "IO error: {}", e),
            TerrainSceneError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::FileNotFound(path) => {
                write!(f, "Height map not found: {}", path.display())
            }
            TerrainError::Io { path, source } => {
                write!(f, "Failed to read height map {}: {}", path.display(), source)
            }
            TerrainError::NotSquare { len } => {
                write!(f, "Height map size {} bytes is not a perfect square", len)
            }
            TerrainError::Empty => write!(f, "Height map file is empty"),
            TerrainError::InvalidDivisor(d) => {
                write!(f, "Height divisor must be finite and positive, got {}", d)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::MissingCount(section) => {
                write!(f, "Missing {} count in mesh file", section)
            }
            MeshLoadError::SizeMismatch { section, stride, available } => write!(
                f,
                "No {} count matches the {} remaining bytes (stride {})",
                section, available, stride
            ),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::LightLimit { kind, max } => {
                write!(f, "Too many {} lights (max {})", kind, max)
            }
            SceneError::BufferIndex { index, count } => {
                write!(f, "Upload buffer index {} out of range (count {})", index, count)
            }
            SceneError::MissingResource(name) => write!(f, "Missing scene resource: {}", name),
        }
    }
}

impl std::error::Error for TerrainSceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainSceneError::Io(e) => Some(e),
            TerrainSceneError::Config(e) => Some(e),
            TerrainSceneError::Terrain(e) => Some(e),
            TerrainSceneError::MeshLoading(e) => Some(e),
            TerrainSceneError::Scene(e) => Some(e),
            TerrainSceneError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
impl std::error::Error for MeshLoadError {}
impl std::error::Error for SceneError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for TerrainSceneError {
    fn from(err: std::io::Error) -> Self {
        TerrainSceneError::Io(err)
    }
}

impl From<ConfigError> for TerrainSceneError {
    fn from(err: ConfigError) -> Self {
        TerrainSceneError::Config(err)
    }
}

impl From<TerrainError> for TerrainSceneError {
    fn from(err: TerrainError) -> Self {
        TerrainSceneError::Terrain(err)
    }
}

impl From<MeshLoadError> for TerrainSceneError {
    fn from(err: MeshLoadError) -> Self {
        TerrainSceneError::MeshLoading(err)
    }
}

impl From<SceneError> for TerrainSceneError {
    fn from(err: SceneError) -> Self {
        TerrainSceneError::Scene(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_square_message() {
        let err: TerrainSceneError = TerrainError::NotSquare { len: 10 }.into();
        assert_eq!(
            err.to_string(),
            "Terrain error: Height map size 10 bytes is not a perfect square"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: TerrainSceneError = io.into();
        assert!(matches!(err, TerrainSceneError::Io(_)));
    }
}
