//! Notifier - User-visible status sink

/// Sink for user-visible status messages (aborted transports, cascade
/// cancellations). Not a log; the host shows these to a person.
pub trait Notifier {
    fn post(&mut self, message: &str);
}

/// Discards every notice. Useful when a host has nowhere to show them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn post(&mut self, _message: &str) {}
}
