use gl_wrapper::api::{BufferTarget, PolygonMode, ShaderStage};
use gl_wrapper::recording::{GlCall, RecordingGl};

use two_triangles::bootstrap::{Bootstrap, BootstrapError, FrameStatus, Lifecycle};
use two_triangles::config::{CLEAR_COLOR, FRAGMENT_SHADER, VERTEX_SHADER, WINDOW_HEIGHT, WINDOW_WIDTH};
use two_triangles::input::{InputEvent, Key};
use two_triangles::scene::{SceneError, SceneSettings};

fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn uints(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[test]
fn fixed_sources_target_glsl_330_core() {
    assert!(VERTEX_SHADER.starts_with("#version 330 core"));
    assert!(FRAGMENT_SHADER.starts_with("#version 330 core"));
    assert!(VERTEX_SHADER.contains("layout (location = 0) in vec3 aPos;"));
    assert!(FRAGMENT_SHADER.contains("vec4(1.0f, 0.5f, 0.2f, 1.0f)"));
}

#[test]
fn startup_uploads_the_literal_geometry() {
    let gl = RecordingGl::new();
    let mut bootstrap = Bootstrap::new();

    bootstrap
        .initialize(&gl, &SceneSettings::default(), (WINDOW_WIDTH, WINDOW_HEIGHT))
        .unwrap();

    let program = bootstrap.scene().unwrap().program().get_id();
    assert_ne!(program, 0);

    let vertices = floats(&gl.uploaded(BufferTarget::Array).unwrap());
    assert_eq!(
        vertices,
        vec![
            -0.9, -0.5, 0.0, -0.45, 0.5, 0.0, 0.0, -0.5, -0.0, 0.45, 0.5, 0.0, 0.9, -0.5, 0.0,
        ]
    );

    let indices = uints(&gl.uploaded(BufferTarget::ElementArray).unwrap());
    assert_eq!(indices, vec![0, 1, 2, 2, 3, 4]);

    assert_eq!(
        gl.count(&GlCall::VertexAttribPointer {
            index: 0,
            components: 3,
            stride: 12,
            offset: 0
        }),
        1
    );
    assert_eq!(gl.count(&GlCall::EnableVertexAttribArray(0)), 1);
    assert_eq!(gl.count(&GlCall::PolygonMode(PolygonMode::Line)), 1);
}

#[test]
fn full_session_from_startup_to_escape() {
    let gl = RecordingGl::new();
    let mut bootstrap = Bootstrap::new();
    assert_eq!(bootstrap.lifecycle(), Lifecycle::Uninitialized);

    bootstrap
        .initialize(&gl, &SceneSettings::default(), (WINDOW_WIDTH, WINDOW_HEIGHT))
        .unwrap();
    assert_eq!(bootstrap.lifecycle(), Lifecycle::Initialized);

    let (program, vao, vbo, ebo) = {
        let scene = bootstrap.scene().unwrap();
        let geometry = scene.geometry();
        (
            scene.program().get_id(),
            geometry.vao(),
            geometry.vbo(),
            geometry.ebo(),
        )
    };

    gl.clear_calls();

    for _ in 0..3 {
        assert_eq!(bootstrap.frame().unwrap(), FrameStatus::Present);
    }
    assert_eq!(bootstrap.lifecycle(), Lifecycle::Looping);

    let [r, g, b, a] = CLEAR_COLOR;
    assert_eq!(gl.count(&GlCall::ClearColor(r, g, b, a)), 3);
    assert_eq!(
        gl.count(&GlCall::DrawTriangles {
            count: 6,
            offset: 0
        }),
        3
    );

    bootstrap.handle_event(InputEvent::Resized {
        width: 640,
        height: 480,
    });
    assert_eq!(
        gl.calls().last(),
        Some(&GlCall::Viewport {
            x: 0,
            y: 0,
            width: 640,
            height: 480
        })
    );

    bootstrap.handle_event(InputEvent::Key {
        key: Key::Escape,
        pressed: true,
    });
    assert_eq!(bootstrap.frame().unwrap(), FrameStatus::Present);
    assert_eq!(bootstrap.frame().unwrap(), FrameStatus::Exit);

    bootstrap.shutdown();
    assert_eq!(bootstrap.lifecycle(), Lifecycle::Terminated);
    drop(bootstrap);

    let deletes: Vec<GlCall> = gl
        .calls()
        .into_iter()
        .filter(|c| {
            matches!(
                c,
                GlCall::DeleteVertexArray(_) | GlCall::DeleteBuffer(_) | GlCall::DeleteProgram(_)
            )
        })
        .collect();
    assert_eq!(
        deletes,
        vec![
            GlCall::DeleteVertexArray(vao),
            GlCall::DeleteBuffer(vbo),
            GlCall::DeleteBuffer(ebo),
            GlCall::DeleteProgram(program),
        ]
    );
}

#[test]
fn broken_shader_is_fatal_at_startup() {
    let gl = RecordingGl::new().failing_compile(ShaderStage::Fragment);
    let mut bootstrap = Bootstrap::new();

    let err = bootstrap
        .initialize(&gl, &SceneSettings::default(), (WINDOW_WIDTH, WINDOW_HEIGHT))
        .err()
        .unwrap();

    assert!(matches!(err, BootstrapError::Scene(SceneError::Program(_))));
    assert_eq!(bootstrap.lifecycle(), Lifecycle::Uninitialized);
    assert!(bootstrap.scene().is_none());
}
