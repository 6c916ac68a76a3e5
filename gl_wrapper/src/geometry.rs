use thiserror::Error;

use crate::api::{BufferTarget, BufferUsage, GlApi};

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: &'a [u32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            data,
            indices,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Uploads vertex and index data as static buffers and records the
    /// attribute layout in a fresh vertex array.
    ///
    /// The array buffer and the vertex array are unbound afterwards. The
    /// element buffer binding is part of the vertex array state and stays.
    pub fn build<'gl, G: GlApi + ?Sized>(
        self,
        gl: &'gl G,
    ) -> Result<IndexedGeometry<'gl, G>, GBError> {
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        if total_len == 0 || self.data.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        if self.indices.is_empty() {
            return Err(GBError::NoIndices);
        }

        let vertices = self.data.len() / total_len;

        if let Some(&index) = self.indices.iter().find(|i| **i as usize >= vertices) {
            return Err(GBError::IndexOutOfRange { index, vertices });
        }

        let vao = gl.gen_vertex_array();
        let vbo = gl.gen_buffer();
        let ebo = gl.gen_buffer();

        gl.bind_vertex_array(vao);

        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_data(
            BufferTarget::Array,
            bytemuck::cast_slice(self.data),
            BufferUsage::StaticDraw,
        );

        gl.bind_buffer(BufferTarget::ElementArray, ebo);
        gl.buffer_data(
            BufferTarget::ElementArray,
            bytemuck::cast_slice(self.indices),
            BufferUsage::StaticDraw,
        );

        let stride = total_len * std::mem::size_of::<f32>();
        let mut offset = 0;

        for (i, attr) in self.attributes.iter().enumerate() {
            gl.vertex_attrib_pointer(
                i as u32,
                attr.size() as i32,
                stride as i32,
                offset * std::mem::size_of::<f32>(),
            );
            offset += attr.size();
            gl.enable_vertex_attrib_array(i as u32);
        }

        gl.bind_buffer(BufferTarget::Array, 0);
        gl.bind_vertex_array(0);

        log::debug!(
            "uploaded {vertices} vertices and {} indices (vao {vao}, vbo {vbo}, ebo {ebo})",
            self.indices.len()
        );

        Ok(IndexedGeometry {
            gl,
            vao,
            vbo,
            ebo,
            indices: self.indices.len(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index data is empty")]
    NoIndices,
    #[error("Index {index} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct IndexedGeometry<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
    vao: u32,
    vbo: u32,
    ebo: u32,
    indices: usize,
}

impl<'gl, G: GlApi + ?Sized> IndexedGeometry<'gl, G> {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vbo(&self) -> u32 {
        self.vbo
    }

    pub fn ebo(&self) -> u32 {
        self.ebo
    }

    pub fn indices(&self) -> usize {
        self.indices
    }
}

impl<'gl, G: GlApi + ?Sized> Drop for IndexedGeometry<'gl, G> {
    fn drop(&mut self) {
        log::debug!(
            "deleting geometry (vao {}, vbo {}, ebo {})",
            self.vao,
            self.vbo,
            self.ebo
        );
        self.gl.delete_vertex_array(self.vao);
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_buffer(self.ebo);
    }
}
