/// Geometry primitives handed to the rasterizer
use nalgebra::{Vector3, Vector4};

/// Kind of primitive a draw call assembles from its index triples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Line,
    Triangle,
}

/// A triangle in screen space, after the viewport transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector4<f32>; 3],
}

impl Triangle {
    pub fn new(a: Vector4<f32>, b: Vector4<f32>, c: Vector4<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn a(&self) -> Vector3<f32> {
        self.vertices[0].xyz()
    }

    pub fn b(&self) -> Vector3<f32> {
        self.vertices[1].xyz()
    }

    pub fn c(&self) -> Vector3<f32> {
        self.vertices[2].xyz()
    }

    /// The three edges in the order they are drawn as a wireframe
    pub fn edges(&self) -> [(Vector3<f32>, Vector3<f32>); 3] {
        [
            (self.c(), self.a()),
            (self.c(), self.b()),
            (self.b(), self.a()),
        ]
    }
}
