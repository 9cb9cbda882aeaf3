/// 二进制网格文件读写
///
/// 文件格式与资源导出工具一致：
///
/// ```text
/// <顶点数量，十进制文本> <顶点结构的原始字节>
/// [<索引数量，十进制文本> <u32 索引的原始字节>]
/// ```
///
/// 数量文本与原始字节之间没有分隔符。当原始数据的第一个字节恰好也是 ASCII 数字时，
/// 单看文本无法确定数量在哪里结束，所以读取时会尝试数字串的每个前缀，
/// 选出剩余字节数恰好等于 `数量 × 步长` 的那个。
use super::{MeshLayout, MeshLoader};
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use bytemuck::Pod;
use std::path::Path;

/// 二进制网格加载器
///
/// # 使用示例
///
/// ```rust,no_run
/// use terrain_scene::geometry::loaders::{BinaryMeshLoader, MeshLayout, MeshLoader};
/// use terrain_scene::geometry::vertex::TextureVertex;
/// use std::path::Path;
///
/// let mesh = BinaryMeshLoader::load_from_file::<TextureVertex>(
///     Path::new("assets/CubeMesh.binary"),
///     MeshLayout::default(),
/// )?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BinaryMeshLoader;

impl MeshLoader for BinaryMeshLoader {
    fn load_from_file<V: Pod>(path: &Path, layout: MeshLayout) -> Result<MeshData<V>> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let data = std::fs::read(path)?;
        let mesh = Self::load_from_memory::<V>(&data, layout)?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        tracing::debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            "Loaded binary mesh"
        );

        Ok(mesh.with_name(name))
    }

    fn load_from_memory<V: Pod>(data: &[u8], layout: MeshLayout) -> Result<MeshData<V>> {
        let stride = std::mem::size_of::<V>();
        if stride == 0 {
            return Err(MeshLoadError::UnsupportedFormat("zero-sized vertex type".to_string()).into());
        }

        let start = data
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(data.len());
        let data = &data[start..];

        let mesh = if layout.indexed {
            let (vertices, indices) = split_indexed(data, stride)?;
            MeshData::indexed(decode(vertices, stride), decode(indices, 4), layout.topology)
        } else {
            let vertices = split_exact(data, stride, "vertex")?;
            MeshData::new(decode(vertices, stride), layout.topology)
        };

        mesh.validate()?;
        Ok(mesh)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["binary", "bin"]
    }
}

impl BinaryMeshLoader {
    /// 把网格编码为二进制格式；有索引时一并写出
    pub fn encode<V: Pod>(mesh: &MeshData<V>) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            24 + mesh.vertices.len() * std::mem::size_of::<V>() + mesh.indices.len() * 4,
        );
        out.extend_from_slice(mesh.vertices.len().to_string().as_bytes());
        out.extend_from_slice(bytemuck::cast_slice(&mesh.vertices));
        if mesh.is_indexed() {
            out.extend_from_slice(mesh.indices.len().to_string().as_bytes());
            out.extend_from_slice(bytemuck::cast_slice(&mesh.indices));
        }
        out
    }

    /// 写出网格文件
    pub fn save<V: Pod>(mesh: &MeshData<V>, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::encode(mesh))?;
        tracing::debug!(path = %path.display(), vertices = mesh.vertex_count(), "Saved binary mesh");
        Ok(())
    }
}

/// 数据开头的 ASCII 数字串长度
fn digit_run(data: &[u8]) -> usize {
    data.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// 数字串前缀 `digits[..len]` 表示的数量；溢出时返回 `None`
fn prefix_value(digits: &[u8], len: usize) -> Option<usize> {
    digits[..len].iter().try_fold(0usize, |acc, &d| {
        acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
    })
}

/// 找到数量前缀，使剩余数据恰好容纳 `数量 × 步长` 字节，返回该数据段
fn split_exact<'a>(data: &'a [u8], stride: usize, section: &'static str) -> Result<&'a [u8]> {
    let run = digit_run(data);
    if run == 0 {
        return Err(MeshLoadError::MissingCount(section).into());
    }

    for len in 1..=run {
        let Some(count) = prefix_value(data, len) else { break };
        if count.checked_mul(stride) == Some(data.len() - len) {
            return Ok(&data[len..]);
        }
    }

    Err(MeshLoadError::SizeMismatch {
        section,
        stride,
        available: data.len(),
    }
    .into())
}

/// 带索引的网格：先试顶点数量的每个前缀，再要求其后的索引段恰好填满文件
fn split_indexed(data: &[u8], stride: usize) -> Result<(&[u8], &[u8])> {
    let run = digit_run(data);
    if run == 0 {
        return Err(MeshLoadError::MissingCount("vertex").into());
    }

    for len in 1..=run {
        let Some(count) = prefix_value(data, len) else { break };
        let Some(end) = count.checked_mul(stride).and_then(|n| n.checked_add(len)) else {
            break;
        };
        if end >= data.len() {
            continue;
        }

        if let Ok(indices) = split_exact(&data[end..], 4, "index") {
            return Ok((&data[len..end], indices));
        }
    }

    Err(MeshLoadError::SizeMismatch {
        section: "vertex",
        stride,
        available: data.len(),
    }
    .into())
}

fn decode<T: Pod>(bytes: &[u8], stride: usize) -> Vec<T> {
    bytes
        .chunks_exact(stride)
        .map(bytemuck::pod_read_unaligned::<T>)
        .collect()
}
