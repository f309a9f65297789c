/// ASCII framebuffer rasterizer for scene previews
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector4;
use std::io::Write;

use vol3d_core::math;
use vol3d_core::{Camera, Mat4, Mesh, Triangle, Vec3};

/// Character luminosity ramp (darkest to lightest).
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Depth-buffered character framebuffer that scenes are rasterized into.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
    color_buffer: Vec<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![(255, 255, 255); size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill((255, 255, 255));
    }

    /// Rasterize every mesh under the camera's view and projection. Each
    /// mesh runs through its own full model matrix, so the preview shows
    /// the same world-space layout the exporters see.
    pub fn render_scene(&mut self, camera: &Camera, meshes: &[&Mesh], wireframe: bool) {
        let aspect = self.width as f64 / self.height as f64;
        let view_proj = camera.projection_matrix(aspect) * camera.view_matrix();

        for mesh in meshes {
            let model = mesh.transform.matrix();
            let mvp = view_proj * model;
            let color = to_rgb(&mesh.color());

            for triangle in mesh.triangles() {
                self.render_triangle(triangle, &model, &mvp, color, wireframe);
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model: &Mat4,
        mvp: &Mat4,
        color: (u8, u8, u8),
        wireframe: bool,
    ) {
        let mut screen = [(0.0, 0.0, 0.0); 3];
        for (out, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match self.project(vertex, mvp) {
                Some(coords) => *out = coords,
                // Whole triangle is dropped when any vertex clips; this is
                // what makes the orthographic depth bands slice the scene.
                None => return,
            }
        }

        let character = self.shade(triangle, model);

        if wireframe {
            self.draw_line(screen[0], screen[1], character, color);
            self.draw_line(screen[1], screen[2], character, color);
            self.draw_line(screen[2], screen[0], character, color);
        } else {
            self.rasterize_triangle(&screen, character, color);
        }
    }

    /// Pick a ramp character from the world-space face normal against a
    /// fixed camera-facing light. Two-sided, since generated soups are not
    /// uniformly wound.
    fn shade(&self, triangle: &Triangle, model: &Mat4) -> char {
        let v0 = math::transform_point(&triangle.vertices[0], model);
        let v1 = math::transform_point(&triangle.vertices[1], model);
        let v2 = math::transform_point(&triangle.vertices[2], model);

        let brightness = match math::normalize(&(v1 - v0).cross(&(v2 - v0))) {
            Some(normal) => normal.dot(&Vec3::new(0.0, 0.0, -1.0)).abs(),
            // Degenerate triangle (e.g. zero scale), draw it dim.
            None => 0.0,
        };

        let index = ((brightness * (LUMINOSITY_RAMP.len() - 1) as f64) as usize)
            .min(LUMINOSITY_RAMP.len() - 1);
        LUMINOSITY_RAMP[index]
    }

    /// Project a world-space vertex to screen space, or `None` when it
    /// falls outside the clip volume.
    fn project(&self, vertex: &Vec3, mvp: &Mat4) -> Option<(f64, f64, f64)> {
        let h = mvp * Vector4::new(vertex.x, vertex.y, vertex.z, 1.0);
        if h.w.abs() < 1e-9 {
            return None;
        }

        let ndc_x = h.x / h.w;
        let ndc_y = h.y / h.w;
        let depth = h.z / h.w;

        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth)
        {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * self.width as f64;
        let screen_y = (1.0 - ndc_y) * 0.5 * self.height as f64;
        Some((screen_x, screen_y, depth))
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64)], character: char, color: (u8, u8, u8)) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x as usize, y as usize, depth, character, color);
                    }
                }
            }
        }
    }

    fn draw_line(
        &mut self,
        a: (f64, f64, f64),
        b: (f64, f64, f64),
        character: char,
        color: (u8, u8, u8),
    ) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil() as usize + 1;
        for i in 0..steps {
            let t = i as f64 / steps.saturating_sub(1).max(1) as f64;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            if x >= 0.0 && y >= 0.0 && (x as usize) < self.width && (y as usize) < self.height {
                self.plot(x as usize, y as usize, depth, character, color);
            }
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f64, character: char, color: (u8, u8, u8)) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    /// Queue the colored framebuffer to a terminal writer.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let (r, g, b) = self.color_buffer[idx];
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Plain-text copy of the framebuffer, for file output.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

/// Barycentric coordinates of `p` in the screen-space triangle, or `None`
/// when the triangle is degenerate.
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;
    Some((w0, w1, w2))
}

fn to_rgb(color: &Vec3) -> (u8, u8, u8) {
    (
        (color.x.clamp(0.0, 1.0) * 255.0) as u8,
        (color.y.clamp(0.0, 1.0) * 255.0) as u8,
        (color.z.clamp(0.0, 1.0) * 255.0) as u8,
    )
}
