//! 帧循环
//!
//! 每帧的步骤：
//!
//! 1. 计时器前进
//! 2. `InputSource` 填充输入状态
//! 3. 场景处理输入并更新
//! 4. 场景写出 `FramePacket`
//! 5. `FrameSink` 同步消费数据包（记录、提交、呈现都在这里完成）
//!
//! 帧与帧之间完全串行，下一帧在上一帧的数据包被接收端处理完之后才开始。

use std::sync::Arc;

use crate::component::{CameraData, InstanceData, MaterialData, ObjectData, ShadowData};
use crate::core::config::FrameConfig;
use crate::core::error::Result;
use crate::core::input::{InputSource, InputSystem};
use crate::core::timer::Timer;
use crate::renderer::upload::UploadBuffer;
use crate::scene::Scene;

/// 各材质的常量缓冲区，构建场景时暂存一次
#[derive(Debug, Clone)]
pub struct MaterialBuffers {
    pub cube: Arc<UploadBuffer<MaterialData>>,
    pub terrain: Arc<UploadBuffer<MaterialData>>,
    pub grass: Arc<UploadBuffer<MaterialData>>,
}

/// 一帧暂存好的全部上传数据
#[derive(Debug, Clone)]
pub struct FramePacket {
    pub frame_index: u64,
    pub delta_time: f32,

    pub camera: UploadBuffer<CameraData>,
    /// `light_num` 加上三个光源数组，256 字节对齐
    pub lights: Vec<u8>,
    pub shadow: UploadBuffer<ShadowData>,

    pub terrain: UploadBuffer<ObjectData>,
    pub skybox: UploadBuffer<ObjectData>,

    /// 聚光灯立方体和玩家
    pub cube_instances: UploadBuffer<InstanceData>,
    pub cube_count: usize,
    pub grass_instances: Arc<UploadBuffer<InstanceData>>,
    pub grass_count: usize,

    pub materials: MaterialBuffers,
}

impl FramePacket {
    /// 本帧需要上传的字节数
    pub fn upload_size(&self) -> usize {
        self.camera.total_size()
            + self.lights.len()
            + self.shadow.total_size()
            + self.terrain.total_size()
            + self.skybox.total_size()
            + self.cube_instances.total_size()
            + self.grass_instances.total_size()
    }
}

/// 帧数据的消费端
pub trait FrameSink {
    fn submit(&mut self, packet: &FramePacket) -> Result<()>;
}

/// 只记录日志的接收端
#[derive(Debug, Clone)]
pub struct LoggingSink {
    /// 每隔多少帧输出一次 info 日志
    report_interval: u64,
    frames: u64,
}

impl LoggingSink {
    pub fn new(report_interval: u64) -> Self {
        Self {
            report_interval: report_interval.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameSink for LoggingSink {
    fn submit(&mut self, packet: &FramePacket) -> Result<()> {
        self.frames += 1;
        crate::engine_debug!(
            frame = packet.frame_index,
            delta_time = packet.delta_time,
            bytes = packet.upload_size(),
            "Frame staged"
        );
        if packet.frame_index % self.report_interval == 0 {
            crate::engine_info!(
                frame = packet.frame_index,
                cubes = packet.cube_count,
                grass = packet.grass_count,
                bytes = packet.upload_size(),
                "Frame submitted"
            );
        }
        Ok(())
    }
}

/// 保存所有数据包的接收端，供测试和离线检查使用
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub packets: Vec<FramePacket>,
}

impl FrameSink for CollectingSink {
    fn submit(&mut self, packet: &FramePacket) -> Result<()> {
        self.packets.push(packet.clone());
        Ok(())
    }
}

/// 串行帧循环
pub struct FrameLoop<S> {
    timer: Timer,
    input: InputSystem,
    source: S,
}

impl<S: InputSource> FrameLoop<S> {
    pub fn new(timer: Timer, source: S) -> Self {
        Self {
            timer,
            input: InputSystem::new(),
            source,
        }
    }

    /// `fixed_delta` 大于 0 时使用固定步长
    pub fn from_config(config: &FrameConfig, source: S) -> Self {
        let timer = if config.fixed_delta > 0.0 {
            Timer::fixed(config.fixed_delta)
        } else {
            Timer::new()
        };
        Self::new(timer, source)
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    /// 运行一帧
    pub fn run_frame(&mut self, scene: &mut Scene, sink: &mut dyn FrameSink) -> Result<()> {
        self.timer.tick();
        let delta_time = self.timer.elapsed();
        let frame = self.timer.frame_count();

        self.source.poll(frame, &mut self.input);
        scene.handle_input(&mut self.input, delta_time);
        scene.update(delta_time)?;

        let packet = scene.stage(frame, delta_time)?;
        sink.submit(&packet)
    }

    /// 连续运行 `frames` 帧，任何一帧失败都会立即返回
    pub fn run_frames(&mut self, scene: &mut Scene, sink: &mut dyn FrameSink, frames: u64) -> Result<()> {
        crate::engine_info!(frames, "Frame loop started");
        for _ in 0..frames {
            self.run_frame(scene, sink)?;
        }
        crate::engine_info!(
            frames = self.timer.frame_count(),
            total_time = self.timer.total(),
            "Frame loop finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Config, SamplerKind};
    use crate::core::input::{Key, NoInput};
    use crate::core::scene::SceneConfig;
    use crate::core::error::{SceneError, TerrainSceneError};
    use crate::terrain::{HeightGrid, HeightSampler};

    fn scene() -> Scene {
        let grid = HeightGrid::from_heights(17, vec![0.0; 17 * 17]).unwrap();
        let sampler = HeightSampler::new(Arc::new(grid), SamplerKind::Linear);
        let mut scene_config = SceneConfig::default();
        scene_config.grass.extent = 1;
        Scene::build(&Config::default(), &scene_config, sampler).unwrap()
    }

    struct FailingSink;

    impl FrameSink for FailingSink {
        fn submit(&mut self, _packet: &FramePacket) -> Result<()> {
            Err(SceneError::MissingResource("swap chain".to_string()).into())
        }
    }

    #[test]
    fn test_frames_are_numbered_from_one() {
        let mut scene = scene();
        let mut sink = CollectingSink::default();
        let mut frame_loop = FrameLoop::new(Timer::fixed(0.02), NoInput);
        frame_loop.run_frames(&mut scene, &mut sink, 3).unwrap();

        let indices: Vec<u64> = sink.packets.iter().map(|p| p.frame_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(sink.packets.iter().all(|p| (p.delta_time - 0.02).abs() < 1e-6));
        assert!((frame_loop.timer().total() - 0.06).abs() < 1e-5);
    }

    #[test]
    fn test_scripted_input_moves_player() {
        let mut scene = scene();
        let mut sink = CollectingSink::default();
        let source = |frame: u64, input: &mut InputSystem| {
            if frame == 1 {
                input.press(Key::R);
            }
        };
        let config = FrameConfig { frames: 2, fixed_delta: 0.1 };
        let mut frame_loop = FrameLoop::from_config(&config, source);
        frame_loop.run_frames(&mut scene, &mut sink, 2).unwrap();

        assert!(frame_loop.input().is_key_pressed(Key::R));
        // 玩家是实例缓冲区中的最后一项
        let last = sink.packets.last().unwrap();
        let player = last.cube_instances.get(last.cube_count - 1).unwrap();
        assert!((player.world[1][3] - scene.player().position().y).abs() < 1e-5);
    }

    #[test]
    fn test_sink_error_stops_loop() {
        let mut scene = scene();
        let mut frame_loop = FrameLoop::new(Timer::fixed(0.016), NoInput);
        let result = frame_loop.run_frames(&mut scene, &mut FailingSink, 5);
        assert!(matches!(result, Err(TerrainSceneError::Scene(_))));
        assert_eq!(frame_loop.timer().frame_count(), 1);
    }

    #[test]
    fn test_logging_sink_counts_frames() {
        let mut scene = scene();
        let mut sink = LoggingSink::new(0);
        let mut frame_loop = FrameLoop::new(Timer::fixed(0.016), NoInput);
        frame_loop.run_frames(&mut scene, &mut sink, 4).unwrap();
        assert_eq!(sink.frames(), 4);
    }

    #[test]
    fn test_upload_size_counts_every_buffer() {
        let packet = scene().stage(1, 0.0).unwrap();
        let expected = packet.camera.total_size()
            + packet.lights.len()
            + packet.shadow.total_size()
            + packet.terrain.total_size()
            + packet.skybox.total_size()
            + packet.cube_instances.total_size()
            + packet.grass_instances.total_size();
        assert_eq!(packet.upload_size(), expected);
        assert_eq!(packet.lights.len() % 256, 0);
    }
}
