//! Timed driver for the demo script.
//!
//! Runs a [`DemoScript`] on a background task: after every interval it
//! applies one step and sends it through a channel, rescheduling only
//! while the script continues. The task is tied to the driver: `stop()`
//! cancels it and dropping the driver aborts it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use super::script::{DemoScript, ScriptStep};
use crate::config::DemoConfig;

/// Background driver that advances the demo script on a timer.
///
/// # Example
///
/// ```ignore
/// use planbar::config::DemoConfig;
/// use planbar::demo::DemoDriver;
///
/// let (driver, mut steps) = DemoDriver::new(DemoConfig::default());
/// driver.start().await;
///
/// while let Some(step) = steps.recv().await {
///     println!("progress is now {}", step.value());
/// }
///
/// driver.stop().await;
/// ```
pub struct DemoDriver {
    /// Script and timing settings.
    config: DemoConfig,
    /// Channel sender for applied steps.
    sender: mpsc::Sender<ScriptStep>,
    /// Flag to signal the background task to stop.
    stop_flag: Arc<AtomicBool>,
    /// Handle to the background task.
    task_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl DemoDriver {
    /// Creates a driver and the receiver its steps arrive on.
    pub fn new(config: DemoConfig) -> (Self, mpsc::Receiver<ScriptStep>) {
        let (sender, receiver) = mpsc::channel(16);

        let driver = Self {
            config,
            sender,
            stop_flag: Arc::new(AtomicBool::new(false)),
            task_handle: Arc::new(Mutex::new(None)),
        };

        (driver, receiver)
    }

    /// Starts the script from its configured values.
    ///
    /// Does nothing if the task is already running.
    pub async fn start(&self) {
        let mut task = self.task_handle.lock().await;
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        self.stop_flag.store(false, Ordering::SeqCst);

        let interval = self.config.interval();
        let mut script = DemoScript::new(
            self.config.planned,
            self.config.progress,
            self.config.step,
        );
        let sender = self.sender.clone();
        let stop_flag = Arc::clone(&self.stop_flag);

        debug!(
            planned = script.planned(),
            progress = script.progress(),
            ?interval,
            "starting demo driver"
        );

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }

                let Some(step) = script.advance() else {
                    break;
                };
                debug!(progress = step.value(), "demo step");

                if sender.send(step).await.is_err() {
                    // receiver gone, nobody is rendering
                    break;
                }
                if step.is_finished() {
                    debug!(steps = script.steps_taken(), "demo script finished");
                    break;
                }
            }
        });

        *task = Some(handle);
    }

    /// Stops the background task.
    ///
    /// The pending sleep is cancelled rather than awaited. `start()` can be
    /// called again afterwards and restarts the script.
    pub async fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);

        let handle = {
            let mut task = self.task_handle.lock().await;
            task.take()
        };

        if let Some(handle) = handle {
            handle.abort();
            let _ = handle.await;
            debug!("demo driver stopped");
        }
    }

    /// Returns a reference to the demo configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Returns true if the background task is still running.
    pub async fn is_running(&self) -> bool {
        let task = self.task_handle.lock().await;
        if let Some(handle) = task.as_ref() {
            !handle.is_finished()
        } else {
            false
        }
    }
}

impl Drop for DemoDriver {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Ok(mut task) = self.task_handle.try_lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}
