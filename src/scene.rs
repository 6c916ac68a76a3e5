use thiserror::Error;

use gl_wrapper::api::{GlApi, PolygonMode};
use gl_wrapper::geometry::{GBError, GeometryBuilder, IndexedGeometry, VertexAttribute};
use gl_wrapper::program::{PBError, Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use crate::config::{CLEAR_COLOR, FRAGMENT_SHADER, VERTEX_SHADER};
use crate::shape::Shape;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneSettings {
    pub shape: Shape,
    pub polygon_mode: PolygonMode,
    pub clear_color: [f32; 4],
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            polygon_mode: PolygonMode::Line,
            clear_color: CLEAR_COLOR,
        }
    }
}

/// Everything one frame needs: the linked program, the uploaded geometry and
/// the clear color.
pub struct Scene<'gl, G: GlApi + ?Sized> {
    // drop order matters: geometry objects go before the program
    geometry: IndexedGeometry<'gl, G>,
    program: Program<'gl, G>,
    renderer: GlRenderer<'gl, G>,
    clear_color: [f32; 4],
}

impl<'gl, G: GlApi + ?Sized> Scene<'gl, G> {
    pub fn new(gl: &'gl G, settings: &SceneSettings) -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(VERTEX_SHADER, FRAGMENT_SHADER).build(gl)?;

        let geometry =
            GeometryBuilder::new(settings.shape.vertices(), settings.shape.indices())
                .with_attribute(VertexAttribute::Vec3)
                .build(gl)?;

        let renderer = GlRenderer::new(gl);
        renderer.polygon_mode(settings.polygon_mode);

        Ok(Self {
            geometry,
            program,
            renderer,
            clear_color: settings.clear_color,
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    pub fn draw(&self) {
        let [r, g, b, a] = self.clear_color;
        self.renderer.clear_color(r, g, b, a);
        self.renderer.draw(&self.geometry, &self.program);
    }

    pub fn program(&self) -> &Program<'gl, G> {
        &self.program
    }

    pub fn geometry(&self) -> &IndexedGeometry<'gl, G> {
        &self.geometry
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not build shader program: {0}")]
    Program(#[from] PBError),
    #[error("could not upload geometry: {0}")]
    Geometry(#[from] GBError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_wrapper::api::{BufferTarget, ShaderStage};
    use gl_wrapper::recording::{GlCall, RecordingGl};

    #[test]
    fn builds_fixed_program_and_adjacent_triangles() {
        let gl = RecordingGl::new();

        let scene = Scene::new(&gl, &SceneSettings::default()).unwrap();

        assert_ne!(scene.program().get_id(), 0);
        assert_eq!(scene.geometry().indices(), 6);
        assert_eq!(
            gl.count(&GlCall::ShaderSource(1, VERTEX_SHADER.to_string())),
            1
        );
        assert_eq!(gl.count(&GlCall::PolygonMode(PolygonMode::Line)), 1);
        assert!(gl.uploaded(BufferTarget::Array).is_some());
    }

    #[test]
    fn frame_clears_then_draws_six_indices() {
        let gl = RecordingGl::new();
        let scene = Scene::new(&gl, &SceneSettings::default()).unwrap();
        gl.clear_calls();

        scene.draw();

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::ClearColor(0.2, 0.3, 0.3, 1.0),
                GlCall::Clear,
                GlCall::UseProgram(scene.program().get_id()),
                GlCall::BindVertexArray(scene.geometry().vao()),
                GlCall::DrawTriangles {
                    count: 6,
                    offset: 0
                },
            ]
        );
    }

    #[test]
    fn fill_mode_and_other_shape() {
        let gl = RecordingGl::new();
        let settings = SceneSettings {
            shape: Shape::Rectangle,
            polygon_mode: PolygonMode::Fill,
            ..Default::default()
        };

        let scene = Scene::new(&gl, &settings).unwrap();

        assert_eq!(scene.geometry().indices(), 6);
        assert_eq!(gl.count(&GlCall::PolygonMode(PolygonMode::Fill)), 1);
    }

    #[test]
    fn shader_failure_uploads_nothing() {
        let gl = RecordingGl::new().failing_compile(ShaderStage::Vertex);

        let err = Scene::new(&gl, &SceneSettings::default()).err().unwrap();

        assert!(matches!(err, SceneError::Program(PBError::Compilation { .. })));
        assert!(!gl
            .calls()
            .iter()
            .any(|c| matches!(c, GlCall::GenVertexArray(_) | GlCall::GenBuffer(_))));
    }

    #[test]
    fn drop_releases_geometry_then_program() {
        let gl = RecordingGl::new();
        let scene = Scene::new(&gl, &SceneSettings::default()).unwrap();
        let program = scene.program().get_id();
        let vao = scene.geometry().vao();
        gl.clear_calls();

        drop(scene);

        let calls = gl.calls();
        assert_eq!(calls.first(), Some(&GlCall::DeleteVertexArray(vao)));
        assert_eq!(calls.last(), Some(&GlCall::DeleteProgram(program)));
    }
}
