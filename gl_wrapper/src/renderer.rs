use crate::api::{GlApi, PolygonMode};
use crate::geometry::IndexedGeometry;
use crate::program::Program;

pub struct GlRenderer<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
}

impl<'gl, G: GlApi + ?Sized> GlRenderer<'gl, G> {
    pub fn new(gl: &'gl G) -> Self {
        Self { gl }
    }

    /// Binds `program` and the geometry's vertex array, then draws every index
    /// as a triangle list.
    pub fn draw(&self, geometry: &IndexedGeometry<'_, G>, program: &Program<'_, G>) {
        self.gl.use_program(program.get_id());
        self.gl.bind_vertex_array(geometry.vao());
        self.gl.draw_triangles_u32(gl_int(geometry.indices()), 0);
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, gl_int(width), gl_int(height));
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a);
        self.gl.clear_color_buffer();
    }

    pub fn polygon_mode(&self, mode: PolygonMode) {
        self.gl.polygon_mode(mode);
    }
}

/// Saturates at `i32::MAX`, GL sizes and counts are signed.
fn gl_int<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryBuilder, VertexAttribute};
    use crate::program::ProgramBuilder;
    use crate::recording::{GlCall, RecordingGl};

    #[test]
    fn resize_sets_full_viewport() {
        let gl = RecordingGl::new();
        let renderer = GlRenderer::new(&gl);

        renderer.resize(1024, 768);

        assert_eq!(
            gl.calls(),
            vec![GlCall::Viewport {
                x: 0,
                y: 0,
                width: 1024,
                height: 768
            }]
        );
    }

    #[test]
    fn oversized_resize_saturates() {
        let gl = RecordingGl::new();

        GlRenderer::new(&gl).resize(u32::MAX, 1);

        assert_eq!(
            gl.calls(),
            vec![GlCall::Viewport {
                x: 0,
                y: 0,
                width: i32::MAX,
                height: 1
            }]
        );
    }

    #[test]
    fn counts_beyond_i32_saturate() {
        assert_eq!(gl_int(usize::MAX), i32::MAX);
        assert_eq!(gl_int(6_usize), 6);
        assert_eq!(gl_int(0_u32), 0);
    }

    #[test]
    fn clear_sets_color_before_clearing() {
        let gl = RecordingGl::new();

        GlRenderer::new(&gl).clear_color(0.2, 0.3, 0.3, 1.0);

        assert_eq!(
            gl.calls(),
            vec![GlCall::ClearColor(0.2, 0.3, 0.3, 1.0), GlCall::Clear]
        );
    }

    #[test]
    fn draw_binds_then_draws_all_indices() {
        let gl = RecordingGl::new();
        let program = ProgramBuilder::new("v", "f").build(&gl).unwrap();
        let geometry = GeometryBuilder::new(&[0.0; 9], &[0, 1, 2])
            .with_attribute(VertexAttribute::Vec3)
            .build(&gl)
            .unwrap();
        gl.clear_calls();

        GlRenderer::new(&gl).draw(&geometry, &program);

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::UseProgram(program.get_id()),
                GlCall::BindVertexArray(geometry.vao()),
                GlCall::DrawTriangles {
                    count: 3,
                    offset: 0
                },
            ]
        );
    }
}
