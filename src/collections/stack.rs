use tracing::{debug, instrument, warn};

type Link<T> = Option<Box<StackNode<T>>>;

#[derive(Debug)]
struct StackNode<T> {
    value: T,
    next: Link<T>,
}

/// Linked LIFO, used to record actions for undo.
#[derive(Debug)]
pub struct ActionStack<T> {
    top: Link<T>,
    len: usize,
}

impl<T> Default for ActionStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ActionStack<T> {
    pub fn new() -> Self {
        Self { top: None, len: 0 }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn push(&mut self, value: T) {
        let next = self.top.take();
        self.top = Some(Box::new(StackNode { value, next }));
        self.len += 1;
        debug!(len = self.len, "pushed");
    }

    #[instrument(level = "debug", skip_all)]
    pub fn pop(&mut self) -> Option<T> {
        let Some(node) = self.top.take() else {
            warn!("stack is empty, nothing to pop");
            return None;
        };
        self.top = node.next;
        self.len -= 1;
        debug!(len = self.len, "popped");
        Some(node.value)
    }

    pub fn peek(&self) -> Option<&T> {
        self.top.as_ref().map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }
}

impl<T> Drop for ActionStack<T> {
    fn drop(&mut self) {
        let mut cursor = self.top.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = ActionStack::new();
        stack.push("create");
        stack.push("move");
        assert_eq!(stack.peek(), Some(&"move"));
        assert_eq!(stack.pop(), Some("move"));
        assert_eq!(stack.pop(), Some("create"));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_len_tracks_push_and_pop() {
        let mut stack = ActionStack::new();
        (0..100).for_each(|i| stack.push(i));
        assert_eq!(stack.len(), 100);
        stack.pop();
        assert_eq!(stack.len(), 99);
    }
}
