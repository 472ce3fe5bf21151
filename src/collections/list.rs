use std::fmt::Debug;

use tracing::{debug, error, instrument, warn};

type Link<T> = Option<Box<ListNode<T>>>;

#[derive(Debug)]
struct ListNode<T> {
    value: T,
    next: Link<T>,
}

/// Singly linked list with append-at-tail semantics.
#[derive(Debug)]
pub struct TaskList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Default for TaskList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `value` after the last element.
    #[instrument(level = "debug", skip_all)]
    pub fn append(&mut self, value: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(ListNode { value, next: None }));
        self.len += 1;
        debug!(len = self.len, "appended");
    }

    /// Element at zero-based `index`.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            error!(len = self.len, "index out of range");
            return None;
        }
        self.iter().nth(index)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<T: PartialEq + Debug> TaskList<T> {
    /// Removes the first element equal to `value`.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, value: &T) -> bool {
        let mut cursor = &mut self.head;
        loop {
            match cursor {
                None => {
                    warn!("value not found");
                    return false;
                }
                Some(node) if node.value == *value => {
                    *cursor = node.next.take();
                    self.len -= 1;
                    debug!(len = self.len, "removed");
                    return true;
                }
                Some(node) => cursor = &mut node.next,
            }
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl<T> Drop for TaskList<T> {
    // iterative, a recursive drop of a long chain would blow the stack
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<'a, T> IntoIterator for &'a TaskList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for TaskList<T> {
    // built back to front, appending one by one would walk the list each time
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let len = values.len();
        let head = values
            .into_iter()
            .rev()
            .fold(None, |next, value| Some(Box::new(ListNode { value, next })));
        TaskList { head, len }
    }
}
