//! 核心功能模块
//!
//! 本模块提供了场景运行的基础功能，包括日志系统、配置管理、错误处理、输入和计时。
//! 这些模块独立于具体的图形 API。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：引擎配置，支持从配置文件和命令行参数加载
//! - `scene`：场景布局配置（scene.toml）
//! - `error`：错误处理，定义统一的错误类型
//! - `input`：按键与鼠标状态，以及逐帧填充它的输入源
//! - `timer`：帧计时器

pub mod log;
pub mod config;
pub mod scene;
pub mod error;
pub mod input;
pub mod timer;

// 重新导出常用类型，方便使用
pub use error::{Result, TerrainSceneError};
pub use config::Config;
pub use scene::SceneConfig;
pub use input::{InputSource, InputSystem, Key, NoInput};
pub use timer::Timer;
