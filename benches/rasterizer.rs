use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pinhole_raster::math::vec2::Vec2;
use pinhole_raster::math::vec3::Vec3;
use pinhole_raster::render::{rasterize_triangle, RasterTriangle};
use pinhole_raster::{Camera, Extent, FrameBuffer, Mesh, RenderContext, RenderOptions, Texture};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

const UVS: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];

fn create_buffer() -> FrameBuffer {
    FrameBuffer::new(Extent::new(BUFFER_WIDTH, BUFFER_HEIGHT), 1000.0)
}

fn checker_texture() -> Texture {
    let data = (0..64 * 64)
        .map(|i| if (i / 64 + i % 64) % 2 == 0 { 0xFF } else { 0xC0 })
        .collect();
    Texture::from_bytes(data, 64, 64).unwrap()
}

fn triangle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> RasterTriangle {
    RasterTriangle::new(
        [
            Vec3::new(a.0, a.1, 2.0),
            Vec3::new(b.0, b.1, 3.0),
            Vec3::new(c.0, c.1, 4.0),
        ],
        UVS,
    )
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let texture = checker_texture();
    let options = RenderOptions::default();

    for (name, tri) in [
        ("small", triangle((100.0, 100.0), (120.0, 100.0), (110.0, 120.0))),
        ("medium", triangle((100.0, 100.0), (300.0, 100.0), (200.0, 300.0))),
        ("large", triangle((50.0, 50.0), (750.0, 100.0), (400.0, 550.0))),
    ] {
        group.bench_with_input(BenchmarkId::new("textured", name), &tri, |b, tri| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear();
                rasterize_triangle(black_box(tri), &mut fb, Some(&texture), &options)
            });
        });

        group.bench_with_input(BenchmarkId::new("depth_only", name), &tri, |b, tri| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear();
                rasterize_triangle(black_box(tri), &mut fb, None, &options)
            });
        });
    }

    group.finish();
}

/// A `cells` x `cells` grid of quads facing the camera at z = 0.
fn grid_mesh(cells: u32, texture: Arc<Texture>) -> Mesh {
    let step = 2.0 / cells as f32;
    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    for row in 0..=cells {
        for col in 0..=cells {
            positions.push(Vec3::new(
                -1.0 + col as f32 * step,
                -1.0 + row as f32 * step,
                0.0,
            ));
            uvs.push(Vec2::new(col as f32 / cells as f32, row as f32 / cells as f32));
        }
    }

    let stride = cells + 1;
    let mut triangles = Vec::new();
    for row in 0..cells {
        for col in 0..cells {
            let i = row * stride + col;
            triangles.push([i, i + 1, i + stride + 1]);
            triangles.push([i, i + stride + 1, i + stride]);
        }
    }

    Mesh::new("grid", positions, triangles.clone(), uvs, triangles)
        .unwrap()
        .with_texture(texture)
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");
    let texture = Arc::new(checker_texture());
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 1.5),
        90.0,
        1.0,
        1000.0,
        BUFFER_WIDTH as f32 / BUFFER_HEIGHT as f32,
    );

    for cells in [4, 16, 64] {
        let meshes = [grid_mesh(cells, Arc::clone(&texture))];
        group.bench_with_input(
            BenchmarkId::new("grid_triangles", cells * cells * 2),
            &meshes,
            |b, meshes| {
                let mut context = RenderContext::new(&camera, BUFFER_WIDTH, BUFFER_HEIGHT);
                b.iter(|| context.render(black_box(meshes)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_full_frame);
criterion_main!(benches);
