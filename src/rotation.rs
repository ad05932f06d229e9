//! Drag rotation.
//!
//! Owns the spring-damped rotation angle and the click-vs-drag
//! discrimination. Pointer events arrive as plain values (position +
//! timestamp), so the controller is testable without a window. Angles are
//! unbounded on purpose: the revolution count must stay recoverable for
//! item resolution.

use crate::config::CubeConfig;

/// A pointer event in surface coordinates with a timestamp in seconds.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Down { x: f32, y: f32, time: f64 },
    Move { x: f32, y: f32, time: f64 },
    Up { time: f64 },
    Leave { time: f64 },
}

/// What a pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Press-and-release within the drag threshold and click window.
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
}

/// Spring-damped rotation controller with optional idle auto-rotation.
pub struct RotationController {
    target_angle: f32,
    current_angle: f32,
    damping: f32,
    drag_sensitivity: f32,
    drag_threshold: f32,
    click_max_secs: f64,
    auto_rotate_speed: Option<f32>,
    auto_rotate_delay: f64,

    phase: Phase,
    has_dragged: bool,
    drag_start_time: f64,
    /// Cumulative pointer travel since drag start (px).
    travel: f32,
    last_pos: (f32, f32),
    last_interaction: f64,
}

impl RotationController {
    pub fn new(config: &CubeConfig) -> Self {
        Self {
            target_angle: config.start_angle,
            current_angle: config.start_angle,
            damping: config.damping,
            drag_sensitivity: config.drag_sensitivity,
            drag_threshold: config.drag_threshold,
            click_max_secs: config.click_max_secs,
            auto_rotate_speed: config.auto_rotate_speed,
            auto_rotate_delay: config.auto_rotate_delay,

            phase: Phase::Idle,
            has_dragged: false,
            drag_start_time: 0.0,
            travel: 0.0,
            last_pos: (0.0, 0.0),
            last_interaction: 0.0,
        }
    }

    /// Smoothed angle applied to the cube each frame.
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// Unbounded drag target angle.
    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Feed one pointer event. Returns `Some(Click)` when a press-release
    /// pair stayed under both the travel threshold and the click window.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Option<ControllerEvent> {
        match event {
            PointerEvent::Down { x, y, time } => {
                self.phase = Phase::Dragging;
                self.has_dragged = false;
                self.travel = 0.0;
                self.drag_start_time = time;
                self.last_interaction = time;
                self.last_pos = (x, y);
                None
            }
            PointerEvent::Move { x, y, time } => {
                if self.phase != Phase::Dragging {
                    return None;
                }
                self.last_interaction = time;
                let dx = x - self.last_pos.0;
                let dy = y - self.last_pos.1;
                self.travel += (dx * dx + dy * dy).sqrt();
                if self.travel > self.drag_threshold {
                    self.has_dragged = true;
                }
                // Horizontal displacement only; vertical never rotates
                self.target_angle += dx * self.drag_sensitivity;
                self.last_pos = (x, y);
                None
            }
            PointerEvent::Up { time } | PointerEvent::Leave { time } => {
                if self.phase != Phase::Dragging {
                    return None;
                }
                self.phase = Phase::Idle;
                self.last_interaction = time;
                let quick = time - self.drag_start_time < self.click_max_secs;
                if !self.has_dragged && quick {
                    Some(ControllerEvent::Click)
                } else {
                    None
                }
            }
        }
    }

    /// Advance one animation tick at time `now` (seconds): idle
    /// auto-rotation feeds the target, then the current angle eases toward
    /// it. Runs in every phase, so the cube lags the pointer mid-drag too.
    pub fn tick(&mut self, now: f64) -> f32 {
        if let Some(speed) = self.auto_rotate_speed {
            let idle_for = now - self.last_interaction;
            if self.phase != Phase::Dragging && idle_for > self.auto_rotate_delay {
                self.target_angle += speed;
            }
        }
        self.current_angle += (self.target_angle - self.current_angle) * self.damping;
        self.current_angle
    }
}
