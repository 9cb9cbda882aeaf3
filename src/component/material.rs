//! 材质
//!
//! 一个 `Material` 是若干 `MaterialData` 的列表，实例通过材质索引选择其中一项。

use bytemuck::{Pod, Zeroable};

use crate::core::error::Result;
use crate::renderer::upload::{BufferUsageType, UploadBuffer};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialData {
    /// 垂直入射时的菲涅尔反射率
    pub fresnel_r0: [f32; 3],
    pub roughness: f32,
    pub ambient: [f32; 3],
    pub padding: f32,
}

impl MaterialData {
    pub fn new(fresnel_r0: [f32; 3], roughness: f32, ambient: [f32; 3]) -> Self {
        Self {
            fresnel_r0,
            roughness,
            ambient,
            padding: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Material {
    materials: Vec<MaterialData>,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// 单一材质
    pub fn single(fresnel_r0: [f32; 3], roughness: f32, ambient: [f32; 3]) -> Self {
        let mut material = Self::new();
        material.push(MaterialData::new(fresnel_r0, roughness, ambient));
        material
    }

    /// 追加一项，返回它的材质索引
    pub fn push(&mut self, data: MaterialData) -> u32 {
        self.materials.push(data);
        (self.materials.len() - 1) as u32
    }

    pub fn materials(&self) -> &[MaterialData] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// 每项占一个 256 字节对齐的常量缓冲区槽位
    pub fn stage(&self) -> Result<UploadBuffer<MaterialData>> {
        let mut buffer = UploadBuffer::new(self.materials.len(), BufferUsageType::Constant);
        buffer.copy_all(&self.materials)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<MaterialData>(), 32);
    }

    #[test]
    fn test_stage() {
        let mut material = Material::single([0.95, 0.93, 0.88], 0.125, [0.1, 0.1, 0.1]);
        let index = material.push(MaterialData::new([0.01; 3], 0.9, [0.3; 3]));
        assert_eq!(index, 1);

        let buffer = material.stage().unwrap();
        assert_eq!(buffer.element_count(), 2);
        assert_eq!(buffer.total_size(), 512);
        assert_eq!(buffer.get(1).unwrap().roughness, 0.9);
        assert_eq!(buffer.get(0).unwrap().fresnel_r0, [0.95, 0.93, 0.88]);
    }
}
