use std::ffi::{CString, NulError};

use thiserror::Error;

use crate::api::{GlApi, ShaderStage};

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    /// Compiles both stages and links them. Stage objects are deleted once the
    /// link is done, whatever its outcome.
    pub fn build<'gl, G: GlApi + ?Sized>(
        self,
        gl: &'gl G,
    ) -> Result<Program<'gl, G>, PBError> {
        let vert_src = CString::new(self.vert)?;
        let frag_src = CString::new(self.frag)?;

        let vert = compile(gl, ShaderStage::Vertex, &vert_src)?;
        let frag = match compile(gl, ShaderStage::Fragment, &frag_src) {
            Ok(frag) => frag,
            Err(e) => {
                gl.delete_shader(vert);
                return Err(e);
            }
        };

        let program = gl.create_program();
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);

        let linked = gl.program_link_status(program);

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !linked {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(PBError::Linking(log));
        }

        log::debug!("linked shader program {program}");

        Ok(Program { gl, id: program })
    }
}

fn compile<G: GlApi + ?Sized>(
    gl: &G,
    stage: ShaderStage,
    source: &CString,
) -> Result<u32, PBError> {
    let shader = gl.create_shader(stage);
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(PBError::Compilation { stage, log });
    }

    log::trace!("compiled {stage} shader {shader}");

    Ok(shader)
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("shader source contains a NUL byte")]
    InvalidSource(#[from] NulError),
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("program linking failed: {0}")]
    Linking(String),
}

/// A successfully linked program. The handle is never zero while this exists.
pub struct Program<'gl, G: GlApi + ?Sized> {
    gl: &'gl G,
    id: u32,
}

impl<'gl, G: GlApi + ?Sized> Program<'gl, G> {
    pub fn get_id(&self) -> u32 {
        self.id
    }
}

impl<'gl, G: GlApi + ?Sized> Drop for Program<'gl, G> {
    fn drop(&mut self) {
        log::debug!("deleting shader program {}", self.id);
        self.gl.delete_program(self.id);
    }
}
