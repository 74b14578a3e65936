//! Browser timer: `Date.now()`, `setTimeout` futures and cancellable
//! scheduled tasks spawned on the local executor.

use futures::channel::oneshot;
use futures::future::{self, Either, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use advisor_core::ports::{ScheduledTask, TimerPort};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl BrowserTimer {
    pub fn new() -> Self {
        Self
    }
}

impl TimerPort for BrowserTimer {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }

    fn schedule(&self, delay_ms: u32, task: LocalBoxFuture<'static, ()>) -> ScheduledTask {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        spawn_local(async move {
            let delay = Box::pin(TimeoutFuture::new(delay_ms));
            match future::select(delay, cancel_rx).await {
                Either::Left(((), _)) => task.await,
                // Cancelled, or the handle was dropped
                Either::Right(_) => log::debug!("Scheduled task cancelled before firing"),
            }
        });

        ScheduledTask::new(move || {
            let _ = cancel_tx.send(());
        })
    }
}
