#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
    0.0, 0.5, 0.0,
];
const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

#[rustfmt::skip]
const RECTANGLE: [f32; 12] = [
    0.5, 0.5, 0.0,   // top right
    0.5, -0.5, 0.0,  // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0,  // top left
];
const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[rustfmt::skip]
const ADJACENT_TRIANGLES: [f32; 15] = [
    -0.9, -0.5, 0.0,
    -0.45, 0.5, 0.0,
    0.0, -0.5, -0.0,
    0.45, 0.5, 0.0,
    0.9, -0.5, 0.0,
];
const ADJACENT_TRIANGLES_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 4];

/// Literal geometry sets, positions only (3 floats per vertex).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Shape {
    Triangle,
    Rectangle,
    /// Two triangles side by side sharing their middle vertex.
    #[default]
    AdjacentTriangles,
}

impl Shape {
    pub fn vertices(&self) -> &'static [f32] {
        match self {
            Shape::Triangle => &TRIANGLE,
            Shape::Rectangle => &RECTANGLE,
            Shape::AdjacentTriangles => &ADJACENT_TRIANGLES,
        }
    }

    pub fn indices(&self) -> &'static [u32] {
        match self {
            Shape::Triangle => &TRIANGLE_INDICES,
            Shape::Rectangle => &RECTANGLE_INDICES,
            Shape::AdjacentTriangles => &ADJACENT_TRIANGLES_INDICES,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len() / 3
    }

    /// Index triplets as the triangle list draw consumes them.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> {
        self.indices()
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }
}
