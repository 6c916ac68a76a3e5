use std::ffi::{c_char, c_void, CStr};

use gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

const INFO_LOG_LEN: usize = 512;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    StaticDraw,
}

impl BufferUsage {
    fn gl_enum(self) -> GLenum {
        match self {
            BufferUsage::StaticDraw => gl::STATIC_DRAW,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
}

impl PolygonMode {
    fn gl_enum(self) -> GLenum {
        match self {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

/// The subset of OpenGL the wrapper types talk to.
///
/// Handles are plain `u32` names as GL hands them out. Implementations must
/// only be used from the thread that owns the current context.
pub trait GlApi {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &CStr);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    fn gen_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn delete_vertex_array(&self, vao: u32);

    fn gen_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: u32);

    /// Describes a float attribute, `stride` and `offset` in bytes.
    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: usize);
    fn enable_vertex_attrib_array(&self, index: u32);

    fn polygon_mode(&self, mode: PolygonMode);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Indexed triangle list with `u32` indices, `offset` in bytes into the
    /// bound element buffer.
    fn draw_triangles_u32(&self, count: i32, offset: usize);
}

/// Forwards to the globally loaded `gl` function pointers.
///
/// `gl::load_with` must have run against a current context before any method
/// is called.
#[derive(Debug, Default, Copy, Clone)]
pub struct NativeGl;

impl NativeGl {
    /// Checks that the entry points this crate uses were resolved.
    pub fn is_loaded() -> bool {
        gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::GenBuffers::is_loaded()
            && gl::VertexAttribPointer::is_loaded()
            && gl::DrawElements::is_loaded()
            && gl::Viewport::is_loaded()
    }
}

fn read_log(buf: &[u8]) -> String {
    let data = buf.split(|b| *b == 0).next().unwrap_or_default();

    String::from_utf8_lossy(data).into_owned()
}

impl GlApi for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        unsafe {
            gl::ShaderSource(
                shader,
                1,
                (&source.as_ptr()) as *const *const c_char,
                std::ptr::null(),
            );
        }
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut buf = [0_u8; INFO_LOG_LEN];

        unsafe {
            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_LEN as GLsizei,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
        }

        read_log(&buf)
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut buf = [0_u8; INFO_LOG_LEN];

        unsafe {
            gl::GetProgramInfoLog(
                program,
                INFO_LOG_LEN as GLsizei,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
        }

        read_log(&buf)
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut vao: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, (&mut vao) as *mut GLuint) };
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, (&vao) as *const GLuint) }
    }

    fn gen_buffer(&self) -> u32 {
        let mut buffer: GLuint = 0;
        unsafe { gl::GenBuffers(1, (&mut buffer) as *mut GLuint) };
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.gl_enum(), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                target.gl_enum(),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                usage.gl_enum(),
            );
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, (&buffer) as *const GLuint) }
    }

    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode.gl_enum()) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) }
    }

    fn draw_triangles_u32(&self, count: i32, offset: usize) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                count,
                gl::UNSIGNED_INT,
                offset as *const c_void,
            );
        }
    }
}
