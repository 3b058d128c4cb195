// # Observer Trait
//
// Defines the notification hook that subjects call on every state change.
//
// Observers receive no arguments. They hold a handle back to their subject
// and pull whatever state they need from it.

/// Trait for observer implementations
///
/// # Contract
///
/// - `update` is called synchronously from inside `Subject::set_state`
/// - `update` must not panic; the notification loop has no recovery path
/// - `update` may call back into the subject (read state, attach, detach)
///
/// Implementations must be `Send + Sync` so a subject can be shared
/// across threads.
pub trait Observer: Send + Sync {
    /// React to a state change on the bound subject
    fn update(&self);

    /// Human-readable name used in log records
    fn name(&self) -> &str {
        "observer"
    }
}
