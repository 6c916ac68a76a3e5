//! A headless [`GlApi`] that logs every call instead of talking to a driver.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;

use crate::api::{BufferTarget, BufferUsage, GlApi, PolygonMode, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
    GenVertexArray(u32),
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    GenBuffer(u32),
    BindBuffer(BufferTarget, u32),
    BufferData {
        target: BufferTarget,
        data: Vec<u8>,
        usage: BufferUsage,
    },
    DeleteBuffer(u32),
    VertexAttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: usize,
    },
    EnableVertexAttribArray(u32),
    PolygonMode(PolygonMode),
    ClearColor(f32, f32, f32, f32),
    Clear,
    Viewport {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    DrawTriangles { count: i32, offset: usize },
}

#[derive(Debug)]
pub struct RecordingGl {
    calls: RefCell<Vec<GlCall>>,
    next_name: Cell<u32>,
    stages: RefCell<HashMap<u32, ShaderStage>>,
    failing_stage: Option<ShaderStage>,
    failing_link: bool,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGl {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_name: Cell::new(1),
            stages: RefCell::new(HashMap::new()),
            failing_stage: None,
            failing_link: false,
        }
    }

    /// Shaders of `stage` report a failed compile.
    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.failing_stage = Some(stage);
        self
    }

    /// Every program reports a failed link.
    pub fn failing_link(mut self) -> Self {
        self.failing_link = true;
        self
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &GlCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Last data uploaded to `target`.
    pub fn uploaded(&self, target: BufferTarget) -> Option<Vec<u8>> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            GlCall::BufferData { target: t, data, .. } if *t == target => Some(data.clone()),
            _ => None,
        })
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn name(&self) -> u32 {
        let name = self.next_name.get();
        self.next_name.set(name + 1);
        name
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let id = self.name();
        self.stages.borrow_mut().insert(id, stage);
        self.record(GlCall::CreateShader(stage, id));
        id
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        self.record(GlCall::ShaderSource(
            shader,
            source.to_string_lossy().into_owned(),
        ));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let stage = self.stages.borrow().get(&shader).copied();
        stage.is_some() && stage != self.failing_stage
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("0:1(1): error: shader {shader} rejected")
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> u32 {
        let id = self.name();
        self.record(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.failing_link
    }

    fn program_info_log(&self, program: u32) -> String {
        format!("error: program {program} failed to link")
    }

    fn use_program(&self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn gen_vertex_array(&self) -> u32 {
        let id = self.name();
        self.record(GlCall::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: u32) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(GlCall::DeleteVertexArray(vao));
    }

    fn gen_buffer(&self) -> u32 {
        let id = self.name();
        self.record(GlCall::GenBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.record(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(GlCall::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: usize) {
        self.record(GlCall::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        self.record(GlCall::PolygonMode(mode));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor(r, g, b, a));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::Clear);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_triangles_u32(&self, count: i32, offset: usize) {
        self.record(GlCall::DrawTriangles { count, offset });
    }
}
