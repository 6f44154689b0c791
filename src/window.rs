//! SDL2 presentation of a [`FrameBuffer`].
//!
//! Only compiled with the `window` feature. SDL is used for the window, input
//! events and timing; all pixels come from the software pipeline.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::render::FrameBuffer;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: u64 = 1000 / FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Sleeps out the rest of the frame budget and returns the milliseconds
    /// elapsed since the previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < FRAME_TARGET_TIME {
            std::thread::sleep(std::time::Duration::from_millis(
                FRAME_TARGET_TIME - delta_time,
            ));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Streaming texture sized to the last presented framebuffer.
struct FrameTexture {
    texture: Texture,
    width: u32,
    height: u32,
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    texture_creator: TextureCreator<WindowContext>,
    frame: Option<FrameTexture>,
    pixels: Vec<u8>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        log::info!("Opened window '{}' ({}x{})", title, width, height);

        Ok(Self {
            canvas,
            texture_creator,
            frame: None,
            pixels: Vec::new(),
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events. Escape, `q` and closing the window quit.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape) | Some(Keycode::Q),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } if w > 0 && h > 0 => {
                    self.width = w as u32;
                    self.height = h as u32;
                    result = WindowEvent::Resize(self.width, self.height);
                }
                _ => {}
            }
        }
        result
    }

    /// Decodes the color plane to ARGB8888 and shows it, stretched to the
    /// window.
    ///
    /// The streaming texture and pixel buffer persist across frames; the
    /// texture is recreated only when the framebuffer extent changes.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), String> {
        let width = framebuffer.width();
        let height = framebuffer.height();

        let stale = !matches!(&self.frame, Some(f) if f.width == width && f.height == height);
        if stale {
            if let Some(old) = self.frame.take() {
                // SAFETY: the canvas that owns the texture's renderer is
                // still alive, and the texture is not used after this.
                unsafe { old.texture.destroy() };
            }
            let texture = self
                .texture_creator
                .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
                .map_err(|e| e.to_string())?;
            log::debug!("Created {}x{} streaming texture", width, height);
            self.frame = Some(FrameTexture {
                texture,
                width,
                height,
            });
        }

        let Some(frame) = self.frame.as_mut() else {
            return Err("no streaming texture".to_string());
        };
        framebuffer.write_argb8888_bytes(&mut self.pixels);
        frame
            .texture
            .update(None, &self.pixels, (width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&frame.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            // SAFETY: runs before the canvas field is dropped.
            unsafe { frame.texture.destroy() };
        }
    }
}
