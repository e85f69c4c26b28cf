//! Long-running workers.
//!
//! | Task      | Core | Loop                                               |
//! |-----------|------|----------------------------------------------------|
//! | sampler   | App  | N reads → average → classify → `apply_motion`      |
//! | display   | App  | snapshot → compose → render → frames (+ scroll)    |
//! | input     | App  | poll mode button → `cycle_display_mode`            |
//! | listener  | Pro  | UDP identity → `on_identity` (+ buzzer)            |
//!
//! Workers share nothing but [`SharedState`](crate::app::SharedState) and
//! return once its shutdown flag is set, checked at every suspension point.

pub mod display;
pub mod input;
pub mod network;
pub mod sampler;

use crate::drivers::task_pin::{Core, TaskSpec};

pub const SAMPLER_TASK: TaskSpec = TaskSpec {
    name: "sampler\0",
    core: Core::App,
    priority: 5,
    stack_kb: 8,
};

pub const DISPLAY_TASK: TaskSpec = TaskSpec {
    name: "display\0",
    core: Core::App,
    priority: 5,
    stack_kb: 8,
};

pub const INPUT_TASK: TaskSpec = TaskSpec {
    name: "input\0",
    core: Core::App,
    priority: 6,
    stack_kb: 4,
};

pub const LISTENER_TASK: TaskSpec = TaskSpec {
    name: "listener\0",
    core: Core::Pro,
    priority: 5,
    stack_kb: 8,
};
