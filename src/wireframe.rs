//! Wireframe visibility export.
//!
//! Every triangle is projected without rasterization and written as three SVG
//! line segments. A triangle whose three corners all fall inside the screen
//! window is stroked black; any other triangle is stroked red.

use std::io::{self, Write};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::math::vec2::Vec2;
use crate::mesh::Mesh;
use crate::projection::project_vertex_visible;
use crate::render::Extent;

/// Stroke for triangles entirely inside the screen window.
pub const VISIBLE_STROKE: [u8; 3] = [0, 0, 0];
/// Stroke for triangles with at least one corner outside the window.
pub const HIDDEN_STROKE: [u8; 3] = [255, 0, 0];

/// A projected triangle outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireTriangle {
    /// Corners in raster space.
    pub points: [Vec2; 3],
    /// All three corners inside the screen window.
    pub visible: bool,
}

impl WireTriangle {
    pub fn stroke(&self) -> [u8; 3] {
        if self.visible {
            VISIBLE_STROKE
        } else {
            HIDDEN_STROKE
        }
    }
}

/// Projects every triangle of `meshes` with the context's camera.
///
/// Index errors are reported the same way as in [`RenderContext::render`].
pub fn project_wireframe(
    context: &RenderContext,
    meshes: &[Mesh],
) -> Result<Vec<WireTriangle>, RenderError> {
    let world_to_camera = context.world_to_camera();
    let window = context.screen_window();
    let extent = context.extent();
    let near = context.near_clip();

    let mut triangles = Vec::new();
    for mesh in meshes {
        for i in 0..mesh.triangle_count() {
            let corners = mesh
                .triangle_positions(i)?
                .map(|p| project_vertex_visible(p, &world_to_camera, near, &window, extent));
            triangles.push(WireTriangle {
                points: corners.map(|(p, _)| Vec2::new(p.x, p.y)),
                visible: corners.iter().all(|&(_, visible)| visible),
            });
        }
    }

    log::debug!(
        "Wireframe: {} of {} triangles visible",
        triangles.iter().filter(|t| t.visible).count(),
        triangles.len()
    );
    Ok(triangles)
}

/// Writes `triangles` as an SVG document sized to `extent`.
///
/// Coordinates are truncated to whole pixels.
pub fn write_svg<W: Write>(
    mut out: W,
    extent: Extent,
    triangles: &[WireTriangle],
) -> io::Result<()> {
    writeln!(
        out,
        r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        extent.width, extent.height
    )?;
    for tri in triangles {
        let [r, g, b] = tri.stroke();
        for k in 0..3 {
            let a = tri.points[k];
            let c = tri.points[(k + 1) % 3];
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" style="stroke:rgb({},{},{});stroke-width:1" />"#,
                a.x as i32, a.y as i32, c.x as i32, c.y as i32, r, g, b
            )?;
        }
    }
    writeln!(out, "</svg>")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::math::vec3::Vec3;

    fn context() -> RenderContext {
        RenderContext::new(&Camera::new(Vec3::ZERO, 90.0, 1.0, 1000.0, 1.0), 64, 64)
    }

    fn mesh(positions: Vec<Vec3>) -> Mesh {
        Mesh::new("wire", positions, vec![[0, 1, 2]], vec![Vec2::ZERO], vec![[0; 3]]).unwrap()
    }

    #[test]
    fn triangle_in_view_is_visible() {
        let m = mesh(vec![
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(-1.0, 1.0, -2.0),
        ]);
        let wires = project_wireframe(&context(), &[m]).unwrap();
        assert_eq!(wires.len(), 1);
        assert!(wires[0].visible);
        assert_eq!(
            wires[0].points,
            [Vec2::new(32.0, 32.0), Vec2::new(48.0, 48.0), Vec2::new(16.0, 16.0)]
        );
        assert_eq!(wires[0].stroke(), VISIBLE_STROKE);
    }

    #[test]
    fn one_corner_outside_hides_triangle() {
        let outside = mesh(vec![
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(3.0, 0.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        ]);
        let behind = mesh(vec![
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::new(0.0, 1.0, -2.0),
        ]);
        let wires = project_wireframe(&context(), &[outside, behind]).unwrap();
        assert!(wires.iter().all(|w| !w.visible));
        assert!(wires.iter().all(|w| w.stroke() == HIDDEN_STROKE));
    }

    #[test]
    fn index_errors_propagate() {
        let broken = Mesh::new(
            "wire",
            vec![Vec3::ZERO],
            vec![[0, 0, 4]],
            vec![Vec2::ZERO],
            vec![[0; 3]],
        )
        .unwrap();
        assert!(matches!(
            project_wireframe(&context(), &[broken]),
            Err(RenderError::PositionIndexOutOfBounds { index: 4, .. })
        ));
    }

    #[test]
    fn svg_has_three_colored_edges_per_triangle() {
        let wires = [
            WireTriangle {
                points: [Vec2::new(1.5, 2.0), Vec2::new(10.0, 2.0), Vec2::new(1.0, 9.9)],
                visible: true,
            },
            WireTriangle {
                points: [Vec2::new(0.0, 0.0), Vec2::new(80.0, 0.0), Vec2::new(0.0, 5.0)],
                visible: false,
            },
        ];
        let mut out = Vec::new();
        write_svg(&mut out, Extent::new(64, 48), &wires).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="64" height="48""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line ").count(), 6);
        assert_eq!(svg.matches("stroke:rgb(0,0,0)").count(), 3);
        assert_eq!(svg.matches("stroke:rgb(255,0,0)").count(), 3);
        assert!(svg.contains(r#"<line x1="1" y1="2" x2="10" y2="2""#));
        assert!(svg.contains(r#"x1="1" y1="9" x2="1" y2="2""#));
    }
}
