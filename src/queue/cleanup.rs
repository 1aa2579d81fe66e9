/// Teardown strategy for elements still queued when the owner calls
/// [`BlockingQueue::destroy_all_data`](super::BlockingQueue::destroy_all_data).
///
/// Invoked with the queue lock held: implementations must not call back into
/// the queue they are registered on.
pub trait Cleanup<T>: Send {
    fn cleanup(&mut self, value: T);
}

impl<T, F> Cleanup<T> for F
where
    F: FnMut(T) + Send,
{
    fn cleanup(&mut self, value: T) {
        self(value)
    }
}
