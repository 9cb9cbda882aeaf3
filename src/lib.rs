//! terrain_scene - 地形场景的 CPU 侧核心
//!
//! 从高度图构建 Bezier 面片地形，驱动第三人称相机、玩家、太阳和聚光灯阵列，
//! 每帧把相机、光源、阴影和实例数据打包成着色器可以直接使用的字节。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理、输入、计时）
//! - `math`: 基于 nalgebra 的数学类型和左手系矩阵辅助函数
//! - `geometry`: 顶点布局、网格容器、内置网格和二进制网格加载
//! - `terrain`: 高度图、Bezier 面片求值和高度查询
//! - `component`: 场景对象、相机、光源、材质、阴影和实例化批次
//! - `scene`: 把以上内容组装成完整场景
//! - `renderer`: 上传缓冲区和帧循环
//!
//! # 使用示例
//!
//! ```no_run
//! use terrain_scene::core::{Config, NoInput, SceneConfig};
//! use terrain_scene::renderer::{FrameLoop, LoggingSink};
//! use terrain_scene::scene::Scene;
//!
//! let config = Config::default();
//! let sampler = terrain_scene::terrain::load_sampler(&config.terrain)?;
//! let mut scene = Scene::build(&config, &SceneConfig::default(), sampler)?;
//!
//! let mut frame_loop = FrameLoop::from_config(&config.frame, NoInput);
//! frame_loop.run_frames(&mut scene, &mut LoggingSink::default(), 60)?;
//! # Ok::<(), terrain_scene::core::TerrainSceneError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod terrain;
pub mod component;
pub mod scene;
pub mod renderer;
