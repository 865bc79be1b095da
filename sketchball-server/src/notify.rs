use log::info;

/// Fire-and-forget win notifications. Implementations must swallow their own
/// failures, a broken notifier never destabilizes the game loop.
pub trait WinNotifier {
    fn level_complete(&self, level: u32);
}

/// Default notifier, announces wins in the server log.
#[derive(Default)]
pub struct LogNotifier;

impl WinNotifier for LogNotifier {
    fn level_complete(&self, level: u32) {
        info!("Notification sent: level {} complete", level);
    }
}
