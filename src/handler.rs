use crate::error::WriteError;
use crate::message::Message;

/// Trait implemented by all message writers.
///
/// `MessageWriter` is `Send + Sync` so a single writer can be shared by every
/// thread of an upstream logging adapter. Calls block until the batch has been
/// accepted or rejected.
pub trait MessageWriter: Send + Sync {
    /// Write a batch of messages; an empty batch is a no-op.
    fn write_messages(&self, messages: &[Message]) -> Result<(), WriteError>;
}
