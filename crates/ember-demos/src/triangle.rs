use std::mem::{offset_of, size_of};

use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};
use ember_shader::glow::{self, HasContext};

/// Interleaved position + colour, matching `aPos`/`aColor` in the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const POSITION_ATTRIB: u32 = 0;
pub const COLOR_ATTRIB: u32 = 1;

pub const VERTICES: [Vertex; 3] = [
    // bottom right, red
    Vertex { position: [0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },
    // bottom left, green
    Vertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    // top, blue
    Vertex { position: [0.0, 0.5, 0.0], color: [0.0, 0.0, 1.0] },
];

/// GPU-resident copy of [`VERTICES`] with its attribute layout.
pub struct Triangle {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl Triangle {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(anyhow!("failed to create vertex buffer: {e}"));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&VERTICES),
                glow::STATIC_DRAW,
            );

            let stride = size_of::<Vertex>() as i32;
            gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIB,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, position) as i32,
            );
            gl.enable_vertex_attrib_array(POSITION_ATTRIB);
            gl.vertex_attrib_pointer_f32(
                COLOR_ATTRIB,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, color) as i32,
            );
            gl.enable_vertex_attrib_array(COLOR_ATTRIB);

            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { vao, vbo })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, VERTICES.len() as i32);
        }
    }

    pub fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}
