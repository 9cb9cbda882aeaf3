//! 帧计时器
//!
//! 每帧调用一次 `tick()`，`elapsed()` 返回上一帧到本帧的秒数。
//! 配置了固定步长时不读取时钟，便于复现和测试。

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Timer {
    prev: Option<Instant>,
    delta: f32,
    fixed_delta: Option<f32>,
    total: f32,
    frame_count: u64,
}

impl Timer {
    /// 使用真实时钟的计时器
    pub fn new() -> Self {
        Self {
            prev: None,
            delta: 0.0,
            fixed_delta: None,
            total: 0.0,
            frame_count: 0,
        }
    }

    /// 每次 `tick()` 都前进固定秒数的计时器
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta),
            ..Self::new()
        }
    }

    pub fn tick(&mut self) {
        self.delta = match self.fixed_delta {
            Some(delta) => delta,
            None => {
                let now = Instant::now();
                // 第一帧没有上一帧时间，步长记为 0
                let delta = self
                    .prev
                    .map(|prev| now.duration_since(prev).as_secs_f32())
                    .unwrap_or(0.0);
                self.prev = Some(now);
                delta
            }
        };
        self.total += self.delta;
        self.frame_count += 1;
    }

    /// 上一帧经过的秒数
    pub fn elapsed(&self) -> f32 {
        self.delta
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
