pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "LearnOpenGL";

/// Requested context version, always with the core profile.
pub const GL_VERSION: (u8, u8) = (3, 3);

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

pub const VERTEX_SHADER: &str = include_str!("gl_shaders/triangle_vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("gl_shaders/triangle_frag.glsl");
