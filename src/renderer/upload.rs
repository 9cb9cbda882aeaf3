//! 上传缓冲区
//!
//! CPU 端的暂存区：每帧把常量数据和实例数据按 GPU 布局写进字节数组，
//! 由帧接收端决定如何提交。
//!
//! # 对齐规则
//!
//! - **常量缓冲区**：每个元素对齐到 256 字节（D3D12 常量缓冲区视图的要求）
//! - **结构化缓冲区**：元素紧密排列，步长等于 `size_of::<T>()`

use std::marker::PhantomData;

use bytemuck::Pod;

use crate::core::error::{Result, SceneError};

/// 常量缓冲区的对齐粒度
pub const CONSTANT_BUFFER_ALIGNMENT: usize = 256;

/// 把字节数向上对齐到 256 的倍数
#[inline]
pub const fn constant_buffer_size(size: usize) -> usize {
    (size + CONSTANT_BUFFER_ALIGNMENT - 1) & !(CONSTANT_BUFFER_ALIGNMENT - 1)
}

/// 缓冲区使用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsageType {
    /// 常量缓冲区，元素按 256 字节对齐
    Constant,
    /// 结构化缓冲区（实例数据），元素紧密排列
    Structured,
}

/// 上传缓冲区（CPU -> GPU）
///
/// # 类型参数
///
/// * `T` - 缓冲区中存储的数据类型，必须是 `Pod`
///
/// # 示例
///
/// ```rust
/// use terrain_scene::component::ObjectData;
/// use terrain_scene::renderer::{BufferUsageType, UploadBuffer};
///
/// let mut buffer = UploadBuffer::<ObjectData>::new(4, BufferUsageType::Constant);
/// assert_eq!(buffer.element_size(), 256);
///
/// let data = ObjectData { world: [[0.0; 4]; 4] };
/// buffer.copy(&data, 3).unwrap();
/// assert!(buffer.copy(&data, 4).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UploadBuffer<T> {
    /// 元素数量
    element_count: usize,
    /// 每个元素的步长（对齐后）
    element_size: usize,
    /// 使用类型
    usage: BufferUsageType,
    /// 暂存字节
    data: Vec<u8>,
    _phantom: PhantomData<T>,
}

impl<T: Pod> UploadBuffer<T> {
    /// 创建新的上传缓冲区，内容清零
    pub fn new(element_count: usize, usage: BufferUsageType) -> Self {
        let size = std::mem::size_of::<T>();
        let element_size = match usage {
            BufferUsageType::Constant => constant_buffer_size(size),
            BufferUsageType::Structured => size,
        };

        Self {
            element_count,
            element_size,
            usage,
            data: vec![0; element_size * element_count],
            _phantom: PhantomData,
        }
    }

    /// 用一组元素创建并填充
    pub fn from_slice(elements: &[T], usage: BufferUsageType) -> Self {
        let mut buffer = Self::new(elements.len(), usage);
        for (index, element) in elements.iter().enumerate() {
            let offset = index * buffer.element_size;
            buffer.write_at(offset, element);
        }
        buffer
    }

    /// 把 `element` 写到第 `index` 个元素的位置
    pub fn copy(&mut self, element: &T, index: usize) -> Result<()> {
        let offset = self.element_offset(index)?;
        self.write_at(offset, element);
        Ok(())
    }

    /// 从第 0 个元素开始依次写入
    pub fn copy_all(&mut self, elements: &[T]) -> Result<()> {
        if elements.len() > self.element_count {
            return Err(SceneError::BufferIndex {
                index: elements.len() - 1,
                count: self.element_count,
            }
            .into());
        }
        for (index, element) in elements.iter().enumerate() {
            self.copy(element, index)?;
        }
        Ok(())
    }

    /// 读回第 `index` 个元素
    pub fn get(&self, index: usize) -> Option<T> {
        let offset = self.element_offset(index).ok()?;
        let size = std::mem::size_of::<T>();
        Some(bytemuck::pod_read_unaligned(&self.data[offset..offset + size]))
    }

    /// 元素在缓冲区中的字节偏移
    pub fn element_offset(&self, index: usize) -> Result<usize> {
        if index >= self.element_count {
            return Err(SceneError::BufferIndex {
                index,
                count: self.element_count,
            }
            .into());
        }
        Ok(self.element_size * index)
    }

    fn write_at(&mut self, offset: usize, element: &T) {
        let bytes = bytemuck::bytes_of(element);
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl<T> UploadBuffer<T> {
    /// 获取元素数量
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// 获取每个元素的步长（对齐后）
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// 获取总大小
    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    /// 获取使用类型
    pub fn usage(&self) -> BufferUsageType {
        self.usage
    }

    /// 暂存的字节，可以直接拷进映射后的 GPU 内存
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
    struct TestData {
        value: f32,
    }

    #[test]
    fn test_constant_buffer_size() {
        assert_eq!(constant_buffer_size(0), 0);
        assert_eq!(constant_buffer_size(1), 256);
        assert_eq!(constant_buffer_size(256), 256);
        assert_eq!(constant_buffer_size(300), 512);
    }

    #[test]
    fn test_upload_buffer_sizing() {
        let buffer = UploadBuffer::<TestData>::new(10, BufferUsageType::Constant);
        assert_eq!(buffer.element_count(), 10);
        assert_eq!(buffer.element_size(), 256); // 对齐到256字节
        assert_eq!(buffer.total_size(), 2560); // 10 * 256

        let buffer2 = UploadBuffer::<TestData>::new(10, BufferUsageType::Structured);
        assert_eq!(buffer2.element_size(), 4); // float大小，无需对齐
        assert_eq!(buffer2.total_size(), 40); // 10 * 4
    }

    #[test]
    fn test_copy_writes_at_stride() {
        let mut buffer = UploadBuffer::<TestData>::new(3, BufferUsageType::Constant);
        buffer.copy(&TestData { value: 2.5 }, 2).unwrap();

        let bytes = buffer.as_bytes();
        assert_eq!(&bytes[512..516], &2.5f32.to_ne_bytes());
        // 对齐填充保持为零
        assert!(bytes[516..768].iter().all(|&b| b == 0));
        assert_eq!(buffer.get(2), Some(TestData { value: 2.5 }));
        assert_eq!(buffer.get(0), Some(TestData { value: 0.0 }));
    }

    #[test]
    fn test_copy_out_of_range() {
        let mut buffer = UploadBuffer::<TestData>::new(2, BufferUsageType::Structured);
        let err = buffer.copy(&TestData { value: 1.0 }, 2).unwrap_err();
        assert!(matches!(
            err,
            crate::core::error::TerrainSceneError::Scene(SceneError::BufferIndex { index: 2, count: 2 })
        ));
        assert!(buffer.get(5).is_none());
    }

    #[test]
    fn test_copy_all_and_from_slice() {
        let items = [TestData { value: 1.0 }, TestData { value: 2.0 }];
        let from_slice = UploadBuffer::from_slice(&items, BufferUsageType::Structured);
        assert_eq!(from_slice.as_bytes(), bytemuck::cast_slice::<TestData, u8>(&items));

        let mut buffer = UploadBuffer::<TestData>::new(1, BufferUsageType::Structured);
        assert!(buffer.copy_all(&items).is_err());
    }
}
