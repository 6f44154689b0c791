use std::path::PathBuf;

use clap::Parser;
use pinhole_raster::{CullMode, WrapMode};

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrapArg {
    #[default]
    Clamp,
    Repeat,
}

impl From<WrapArg> for WrapMode {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::Clamp => WrapMode::Clamp,
            WrapArg::Repeat => WrapMode::Repeat,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CullArg {
    #[default]
    None,
    Back,
}

impl From<CullArg> for CullMode {
    fn from(arg: CullArg) -> Self {
        match arg {
            CullArg::None => CullMode::None,
            CullArg::Back => CullMode::Back,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // ===== Input =====
    /// Path to the OBJ model
    #[arg(long)]
    pub obj: PathBuf,

    /// Raw texture file, one RGBA2222 byte per texel, row-major
    #[arg(long, requires_all = ["tex_width", "tex_height"])]
    pub texture: Option<PathBuf>,

    /// Texture width in texels
    #[arg(long)]
    pub tex_width: Option<u32>,

    /// Texture height in texels
    #[arg(long)]
    pub tex_height: Option<u32>,

    // ===== Output =====
    /// Render target width
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Render target height
    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Write the color plane to this PNG instead of opening a window
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a grayscale depth image to this PNG
    #[arg(long)]
    pub depth_output: Option<PathBuf>,

    /// Also write the projected wireframe to this SVG, triangles with a
    /// corner outside the screen window in red
    #[arg(long)]
    pub wireframe_svg: Option<PathBuf>,

    // ===== Camera =====
    /// Camera position, format "x,y,z"
    #[arg(long, default_value = "0,0,1.5", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub camera_pos: [f32; 3],

    /// Camera yaw in degrees, rotation about +Y
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw: f32,

    /// Camera pitch in degrees, rotation about +X
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pitch: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 90.0)]
    pub fov: f32,

    /// Near clip distance
    #[arg(long, default_value_t = 1.0)]
    pub near: f32,

    /// Far clip distance, also the depth clear value
    #[arg(long, default_value_t = 1000.0)]
    pub far: f32,

    // ===== Rasterization =====
    /// Texture addressing outside [0, 1]
    #[arg(long, value_enum, default_value_t = WrapArg::Clamp)]
    pub wrap: WrapArg,

    /// Triangle culling by winding
    #[arg(long, value_enum, default_value_t = CullArg::None)]
    pub cull: CullArg,
}

/// Parses "x,y,z" into three floats.
pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected \"x,y,z\", got \"{}\"", s));
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .map_err(|e| format!("invalid component \"{}\": {}", part, e))?;
    }
    Ok(out)
}

impl Args {
    /// Checks the value combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "render target must be non-empty, got {}x{}",
                self.width, self.height
            ));
        }
        if !(self.near > 0.0) {
            return Err(format!("near clip must be positive, got {}", self.near));
        }
        if !(self.far > self.near) {
            return Err(format!(
                "far clip ({}) must exceed near clip ({})",
                self.far, self.near
            ));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(format!("field of view must be in (0, 180), got {}", self.fov));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3"), Ok([1.0, -2.5, 3.0]));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn defaults_follow_viewer_setup() {
        let args = Args::parse_from(["pinhole-raster", "--obj", "model.obj"]);
        assert_eq!(args.width, 1024);
        assert_eq!(args.height, 768);
        assert_eq!(args.camera_pos, [0.0, 0.0, 1.5]);
        assert_eq!(args.wrap, WrapArg::Clamp);
        assert_eq!(args.cull, CullArg::None);
        assert_eq!(args.wireframe_svg, None);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn parses_wireframe_path() {
        let args = Args::parse_from([
            "pinhole-raster",
            "--obj",
            "m.obj",
            "--wireframe-svg",
            "wire.svg",
        ]);
        assert_eq!(args.wireframe_svg, Some(PathBuf::from("wire.svg")));
    }

    #[test]
    fn texture_requires_dimensions() {
        let result = Args::try_parse_from([
            "pinhole-raster",
            "--obj",
            "model.obj",
            "--texture",
            "tex.rgba2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let args = Args::parse_from([
            "pinhole-raster",
            "--obj",
            "m.obj",
            "--near",
            "10",
            "--far",
            "5",
        ]);
        assert!(args.validate().is_err());
    }
}
