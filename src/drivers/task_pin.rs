//! Core-pinned worker threads.
//!
//! ESP-IDF implements `std::thread` with pthreads on top of FreeRTOS
//! tasks. `esp_pthread_set_cfg()` configures the *next* `pthread_create()`
//! from the calling thread, so the config→spawn pair must not interleave
//! with other thread creation on the same thread. On other targets the
//! core and priority are ignored.

use std::io;
use std::thread::{self, JoinHandle};

/// ESP32 CPU cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU) — WiFi and lwIP.
    Pro = 0,
    /// Core 1 (APP_CPU) — sampling, display, input.
    App = 1,
}

/// Static description of one worker.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    /// Must be NUL-terminated (e.g. `"sampler\0"`).
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
}

impl TaskSpec {
    pub fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }
}

#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    task: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    use esp_idf_svc::sys;

    let ret = unsafe {
        let mut cfg = sys::esp_create_default_pthread_config();
        cfg.pin_to_core = task.core as i32;
        cfg.prio = task.priority as _;
        cfg.stack_size = (task.stack_kb * 1024) as _;
        cfg.thread_name = task.name.as_ptr().cast();
        sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        task.display_name(),
        task.core,
        task.priority,
        task.stack_kb
    );

    thread::Builder::new().name(task.display_name().into()).spawn(f)
}

/// Smallest stack a host thread gets; FreeRTOS-sized stacks are too tight
/// for unoptimised host builds.
#[cfg(not(target_os = "espidf"))]
const HOST_MIN_STACK: usize = 64 * 1024;

/// Host fallback — ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    task: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    log::info!(
        "Spawning '{}' (host, no core pinning, stack={}KB)",
        task.display_name(),
        task.stack_kb
    );

    thread::Builder::new()
        .name(task.display_name().into())
        .stack_size((task.stack_kb * 1024).max(HOST_MIN_STACK))
        .spawn(f)
}
