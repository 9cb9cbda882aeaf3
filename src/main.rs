//! terrain_scene - 地形场景的无窗口运行入口
//!
//! 加载高度图，构建场景，然后用脚本化的输入跑指定数量的帧，
//! 每帧的上传数据交给日志接收端。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --heightmap assets/terrain.raw --sampler linear --frames 600
//! ```
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Terrain   │  高度图 / Bezier 查询
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Scene    │  相机、玩家、光源、实例
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  FrameLoop  │  输入 → 更新 → FramePacket → FrameSink
//! └─────────────┘
//! ```

use anyhow::Context;

use terrain_scene::core::{log, Config, InputSystem, Key, SceneConfig};
use terrain_scene::renderer::{FrameLoop, LoggingSink};
use terrain_scene::scene::Scene;
use terrain_scene::{app_error, app_info};

/// 脚本输入的一个周期（帧）
const SCRIPT_PERIOD: u64 = 240;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载引擎配置文件（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 加载场景配置文件（scene.toml）
/// 4. 加载高度图并构建场景
/// 5. 运行帧循环
fn main() {
    if let Err(e) = run() {
        app_error!("{:#}", e);
        eprintln!("terrain_scene failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args().skip(1));
    config.validate().context("invalid configuration")?;

    // 2. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)?;
    app_info!(version = env!("CARGO_PKG_VERSION"), "terrain_scene starting");

    // 3. 加载场景配置
    let scene_config = SceneConfig::from_file_or_default("scene.toml");

    // 4. 地形与场景
    let sampler = terrain_scene::terrain::load_sampler(&config.terrain)
        .with_context(|| format!("failed to load height map {}", config.terrain.heightmap))?;
    app_info!(
        heightmap = %config.terrain.heightmap,
        sampler = ?config.terrain.sampler,
        length = sampler.grid().length(),
        "Terrain loaded"
    );

    let mut scene = Scene::build(&config, &scene_config, sampler).context("failed to build scene")?;

    // 5. 帧循环
    let mut frame_loop = FrameLoop::from_config(&config.frame, scripted_input);
    let mut sink = LoggingSink::default();
    frame_loop.run_frames(&mut scene, &mut sink, u64::from(config.frame.frames))?;

    let player = scene.player().position();
    app_info!(
        frames = sink.frames(),
        player = ?[player.x, player.y, player.z],
        "terrain_scene finished"
    );
    Ok(())
}

/// 没有窗口时的演示输入：前进一段，边走边转，然后后退
fn scripted_input(frame: u64, input: &mut InputSystem) {
    input.release_all();
    match frame % SCRIPT_PERIOD {
        0..=79 => input.press(Key::W),
        80..=159 => {
            input.press(Key::W);
            input.press(Key::D);
            input.on_mouse_move(2.0, 0.0);
        }
        _ => input.press(Key::S),
    }
}
