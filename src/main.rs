mod args;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use pinhole_raster::math::vec3::Vec3;
use pinhole_raster::{wireframe, Camera, Mesh, RenderContext, RenderOptions, Texture};

use args::Args;

/// Written when no output is given and there is no window to show.
#[cfg(not(feature = "window"))]
const DEFAULT_OUTPUT: &str = "render.png";

fn save_color(context: &RenderContext, path: &Path) -> Result<(), Box<dyn Error>> {
    let fb = context.framebuffer();
    image::save_buffer(
        path,
        &fb.to_rgba8(),
        fb.width(),
        fb.height(),
        image::ColorType::Rgba8,
    )?;
    log::info!("Color image saved to {}", path.display());
    Ok(())
}

/// Maps the depth plane to 8-bit gray, near surfaces dark and empty pixels
/// white.
fn depth_to_gray(depth: &[f32], far: f32) -> Vec<u8> {
    let (min, max) = depth
        .iter()
        .filter(|d| d.is_finite() && **d < far)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    let range = max - min;

    depth
        .iter()
        .map(|&d| {
            if !(d < far) {
                255
            } else if range > 1e-6 {
                (((d - min) / range).clamp(0.0, 1.0) * 254.0) as u8
            } else {
                0
            }
        })
        .collect()
}

fn save_depth(context: &RenderContext, path: &Path) -> Result<(), Box<dyn Error>> {
    let fb = context.framebuffer();
    let gray = depth_to_gray(fb.depth_plane(), fb.far());
    image::save_buffer(path, &gray, fb.width(), fb.height(), image::ColorType::L8)?;
    log::info!("Depth image saved to {}", path.display());
    Ok(())
}

fn save_wireframe(
    context: &RenderContext,
    meshes: &[Mesh],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let triangles = wireframe::project_wireframe(context, meshes)?;
    wireframe::write_svg(BufWriter::new(File::create(path)?), context.extent(), &triangles)?;
    log::info!(
        "Wireframe saved to {} ({} of {} triangles inside the screen window)",
        path.display(),
        triangles.iter().filter(|t| t.visible).count(),
        triangles.len()
    );
    Ok(())
}

fn load_texture(args: &Args) -> Result<Option<Arc<Texture>>, Box<dyn Error>> {
    let Some(path) = &args.texture else {
        return Ok(None);
    };
    let (width, height) = args
        .tex_width
        .zip(args.tex_height)
        .ok_or("--texture needs --tex-width and --tex-height")?;
    Ok(Some(Arc::new(Texture::from_file(path, width, height)?)))
}

#[cfg(feature = "window")]
fn run_window(mut context: RenderContext, meshes: &[Mesh]) -> Result<(), Box<dyn Error>> {
    use pinhole_raster::window::{FrameLimiter, Window, WindowEvent};

    let extent = context.extent();
    let mut window = Window::new("pinhole-raster", extent.width, extent.height)?;
    let mut limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => context.resize(w, h),
            WindowEvent::None => {}
        }

        context.render(meshes)?;
        window.present(context.framebuffer())?;
        limiter.wait_and_get_delta(&window);
    }

    log::info!("Window closed");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    args.validate()?;

    let mut meshes = Mesh::load_all_from_obj(&args.obj)?;
    match load_texture(&args)? {
        Some(texture) => {
            for mesh in &mut meshes {
                mesh.set_texture(Some(Arc::clone(&texture)));
            }
        }
        None => log::warn!("No texture given, only depth will be rendered"),
    }

    let [x, y, z] = args.camera_pos;
    let camera = Camera::new(
        Vec3::new(x, y, z),
        args.fov,
        args.near,
        args.far,
        args.width as f32 / args.height as f32,
    )
    .with_orientation(args.yaw.to_radians(), args.pitch.to_radians());

    let options = RenderOptions {
        wrap_mode: args.wrap.into(),
        cull_mode: args.cull.into(),
    };
    log::info!("Wrap mode: {}, cull mode: {}", options.wrap_mode, options.cull_mode);

    let mut context = RenderContext::new(&camera, args.width, args.height).with_options(options);

    let start = Instant::now();
    let stats = context.render(&meshes)?;
    log::info!(
        "Rendered {} triangles in {:.2?} ({} off-screen, {} degenerate, {} culled, {} pixels written)",
        stats.triangles,
        start.elapsed(),
        stats.off_screen,
        stats.degenerate,
        stats.culled,
        stats.pixels_written,
    );

    if let Some(path) = &args.wireframe_svg {
        save_wireframe(&context, &meshes, path)?;
    }

    if let Some(path) = &args.depth_output {
        save_depth(&context, path)?;
    }

    if let Some(path) = &args.output {
        return save_color(&context, path);
    }

    #[cfg(feature = "window")]
    {
        run_window(context, &meshes)
    }

    #[cfg(not(feature = "window"))]
    {
        log::warn!("Built without the window feature, writing {}", DEFAULT_OUTPUT);
        save_color(&context, Path::new(DEFAULT_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_gray_maps_near_to_dark_and_empty_to_white() {
        let gray = depth_to_gray(&[2.0, 4.0, 3.0, 100.0], 100.0);
        assert_eq!(gray, vec![0, 254, 127, 255]);
    }

    #[test]
    fn flat_depth_is_black() {
        assert_eq!(depth_to_gray(&[5.0, 5.0, 10.0], 10.0), vec![0, 0, 255]);
    }
}
