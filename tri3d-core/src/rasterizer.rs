/// Wireframe software rasterizer with its own geometry store
use bitflags::bitflags;
use nalgebra::{Matrix4, Vector3, Vector4};
use std::collections::HashMap;

use crate::error::RasterError;
use crate::frame::FrameBuffer;
use crate::geometry::{Primitive, Triangle};
use crate::transform::Transform;

bitflags! {
    /// Which buffers a `clear` resets
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buffers: u8 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Handle to a registered array of vertex positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionHandle(usize);

/// Handle to a registered array of index triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexHandle(usize);

/// Depth remap from NDC to the depth buffer range
const DEPTH_SCALE: f32 = (100.0 - 0.1) / 2.0;
const DEPTH_OFFSET: f32 = (100.0 + 0.1) / 2.0;

/// Smallest homogeneous `w` a vertex may have before its triangle is dropped
const MIN_W: f32 = 1e-6;

/// Screen coordinates are clamped to this range before line stepping
const COORD_LIMIT: f32 = (1 << 30) as f32;

const LINE_COLOR: Vector3<f32> = Vector3::new(255.0, 255.0, 255.0);

/// Owns the color and depth buffers plus every loaded position and index array
pub struct Rasterizer {
    width: usize,
    height: usize,
    positions: HashMap<usize, Vec<Vector3<f32>>>,
    indices: HashMap<usize, Vec<[usize; 3]>>,
    next_id: usize,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    frame_buffer: FrameBuffer,
    depth_buffer: Vec<f32>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            positions: HashMap::new(),
            indices: HashMap::new(),
            next_id: 0,
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            frame_buffer: FrameBuffer::new(width, height),
            depth_buffer: vec![f32::INFINITY; width * height],
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn load_positions(&mut self, positions: Vec<Vector3<f32>>) -> PositionHandle {
        let id = self.next_id();
        log::debug!("loaded {} positions as buffer {id}", positions.len());
        self.positions.insert(id, positions);
        PositionHandle(id)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> IndexHandle {
        let id = self.next_id();
        log::debug!("loaded {} index triples as buffer {id}", indices.len());
        self.indices.insert(id, indices);
        IndexHandle(id)
    }

    pub fn set_model(&mut self, model: Matrix4<f32>) {
        self.model = model;
    }

    pub fn set_view(&mut self, view: Matrix4<f32>) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    pub fn clear(&mut self, buffers: Buffers) {
        if buffers.contains(Buffers::COLOR) {
            self.frame_buffer.fill(Vector3::zeros());
        }
        if buffers.contains(Buffers::DEPTH) {
            self.depth_buffer.fill(f32::INFINITY);
        }
    }

    /// Transform every indexed triangle by `projection * view * model` and
    /// rasterize its edges into the color buffer.
    ///
    /// All indices are checked before anything is written.
    pub fn draw(
        &mut self,
        positions: PositionHandle,
        indices: IndexHandle,
        primitive: Primitive,
    ) -> Result<(), RasterError> {
        if primitive != Primitive::Triangle {
            return Err(RasterError::UnsupportedPrimitive(primitive));
        }

        let buf = self
            .positions
            .get(&positions.0)
            .ok_or(RasterError::UnknownPositions(positions))?;
        let ind = self
            .indices
            .get(&indices.0)
            .ok_or(RasterError::UnknownIndices(indices))?;

        if let Some(&index) = ind.iter().flatten().find(|&&i| i >= buf.len()) {
            return Err(RasterError::IndexOutOfRange {
                index,
                len: buf.len(),
            });
        }

        let mvp = Transform::mvp_matrix(&self.model, &self.view, &self.projection);
        let (half_w, half_h) = (0.5 * self.width as f32, 0.5 * self.height as f32);

        let mut triangles = Vec::with_capacity(ind.len());
        for face in ind {
            let mut screen = [Vector4::zeros(); 3];
            for (vertex, &i) in screen.iter_mut().zip(face) {
                let clip = mvp * buf[i].push(1.0);
                // Prevent division by near-zero depth values
                if clip.w.abs() < MIN_W {
                    break;
                }
                let v = clip / clip.w;
                *vertex = Vector4::new(
                    half_w * (v.x + 1.0),
                    half_h * (v.y + 1.0),
                    v.z * DEPTH_SCALE + DEPTH_OFFSET,
                    v.w,
                );
            }
            if screen.iter().all(|v| v.w != 0.0 && v.iter().all(|c| c.is_finite())) {
                triangles.push(Triangle::new(screen[0], screen[1], screen[2]));
            } else {
                log::debug!("skipped triangle {face:?} touching the eye plane");
            }
        }

        for triangle in &triangles {
            self.rasterize_wireframe(triangle);
        }
        log::debug!("drew {} triangles", triangles.len());

        Ok(())
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    fn rasterize_wireframe(&mut self, triangle: &Triangle) {
        for (begin, end) in triangle.edges() {
            self.draw_line(begin, end);
        }
    }

    /// Bresenham line between two screen-space points
    fn draw_line(&mut self, begin: Vector3<f32>, end: Vector3<f32>) {
        let clamp = |c: f32| c.clamp(-COORD_LIMIT, COORD_LIMIT);
        let (x1f, y1f) = (clamp(begin.x), clamp(begin.y));
        let (x2f, y2f) = (clamp(end.x), clamp(end.y));
        let (x1, y1, x2, y2) = (x1f as i64, y1f as i64, x2f as i64, y2f as i64);

        let dx = (x2f - x1f) as i64;
        let dy = (y2f - y1f) as i64;
        let dx1 = dx.abs();
        let dy1 = dy.abs();
        let mut px = 2 * dy1 - dx1;
        let mut py = 2 * dx1 - dy1;
        let same_sign = (dx < 0 && dy < 0) || (dx > 0 && dy > 0);

        if dy1 <= dx1 {
            let (mut x, mut y, xe) = if dx >= 0 {
                (x1, y1, x2)
            } else {
                (x2, y2, x1)
            };
            self.set_pixel(x, y, LINE_COLOR);
            while x < xe {
                x += 1;
                if px < 0 {
                    px += 2 * dy1;
                } else {
                    y += if same_sign { 1 } else { -1 };
                    px += 2 * (dy1 - dx1);
                }
                self.set_pixel(x, y, LINE_COLOR);
            }
        } else {
            let (mut x, mut y, ye) = if dy >= 0 {
                (x1, y1, y2)
            } else {
                (x2, y2, y1)
            };
            self.set_pixel(x, y, LINE_COLOR);
            while y < ye {
                y += 1;
                if py <= 0 {
                    py += 2 * dx1;
                } else {
                    x += if same_sign { 1 } else { -1 };
                    py += 2 * (dx1 - dy1);
                }
                self.set_pixel(x, y, LINE_COLOR);
            }
        }
    }

    /// Write a pixel given in raster coordinates (y up); off-canvas points are dropped
    fn set_pixel(&mut self, x: i64, y: i64, color: Vector3<f32>) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let row = self.height - 1 - y as usize;
        self.frame_buffer.set(x as usize, row, color);
    }
}
