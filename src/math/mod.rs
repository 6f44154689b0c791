//! Small fixed-size linear algebra types used by the pipeline.

pub mod mat4;
pub mod vec2;
pub mod vec3;
