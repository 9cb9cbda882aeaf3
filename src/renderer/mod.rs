//! 渲染数据模块
//!
//! 场景每帧写出的上传数据以及消费它们的帧循环。
//! 这里不涉及任何图形 API：`FrameSink` 的实现负责把 `FramePacket`
//! 中的字节交给真正的渲染后端。
//!
//! # 模块结构
//!
//! - `upload`: 按常量缓冲区或结构化缓冲区布局打包的上传缓冲区
//! - `frame`: 帧数据包、接收端和串行帧循环

pub mod upload;
pub mod frame;

pub use upload::{constant_buffer_size, BufferUsageType, UploadBuffer, CONSTANT_BUFFER_ALIGNMENT};
pub use frame::{CollectingSink, FrameLoop, FramePacket, FrameSink, LoggingSink, MaterialBuffers};
