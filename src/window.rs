//! SDL2 window, input translation and frame pacing for the viewer.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::config::ViewerConfig;

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    M,
    Num1,
    Num2,
    Num3,
    Tab,
    V,
    E,
    F,
    S,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        let key = match keycode {
            Keycode::M => Key::M,
            Keycode::Num1 => Key::Num1,
            Keycode::Num2 => Key::Num2,
            Keycode::Num3 => Key::Num3,
            Keycode::Tab => Key::Tab,
            Keycode::V => Key::V,
            Keycode::E => Key::E,
            Keycode::F => Key::F,
            Keycode::S => Key::S,
            Keycode::Up => Key::Up,
            Keycode::Down => Key::Down,
            Keycode::Left => Key::Left,
            Keycode::Right => Key::Right,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { x: f32, y: f32 },
    MouseUp,
    MouseMove { x: f32, y: f32, ctrl: bool },
    Scroll(f32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_time_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, config: &ViewerConfig) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_time_ms: config.frame_time_ms(),
        }
    }

    /// Sleep off the rest of the frame budget. Returns milliseconds since the
    /// previous call.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < self.frame_time_ms {
            let time_to_wait = self.frame_time_ms - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(config: &ViewerConfig) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is boxed and owned by Window; texture is
        // declared before it, so it is dropped first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, config.width, config.height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width: config.width,
            height: config.height,
        })
    }

    /// Drain pending SDL events into viewer events. Escape maps to `Quit`.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        let ctrl = {
            let keyboard = self.event_pump.keyboard_state();
            keyboard.is_scancode_pressed(Scancode::LCtrl)
                || keyboard.is_scancode_pressed(Scancode::RCtrl)
        };

        events
            .into_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => Some(WindowEvent::Resize(w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => Key::from_keycode(keycode).map(WindowEvent::KeyDown),
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => Key::from_keycode(keycode).map(WindowEvent::KeyUp),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => Some(WindowEvent::MouseDown {
                    x: x as f32,
                    y: y as f32,
                }),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => Some(WindowEvent::MouseUp),
                Event::MouseMotion { x, y, .. } => Some(WindowEvent::MouseMove {
                    x: x as f32,
                    y: y as f32,
                    ctrl,
                }),
                Event::MouseWheel { y, .. } => Some(WindowEvent::Scroll(y as f32)),
                _ => None,
            })
            .collect()
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: same ownership argument as in new().
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
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
