use std::fmt::{self, Display, Formatter};

/// A LIFO stack.  The interpreter keeps two of these, the data stack of values and the return
/// stack of loop re-entry positions.
///
/// Popping or peeking an empty stack never produces a default, it returns None and the caller is
/// expected to turn that into a stack underflow error.  There is no maximum depth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T>
where
    T: Clone,
{
    pub fn new() -> Stack<T> {
        Stack { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Stack<T> {
        Stack { items: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the top of the stack.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Read the top of the stack without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop everything above the given depth.  Used to unwind the return stack after an aborted
    /// execution unit.
    pub fn truncate(&mut self, depth: usize) {
        self.items.truncate(depth);
    }

    /// Take a copy of the full contents so that they can be restored later.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Replace the full contents with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: Vec<T>) {
        self.items = snapshot;
    }

    /// Iterate from the bottom of the stack to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

/// Show the stack bottom to top, separated by spaces.
impl<T> Display for Stack<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }

            write!(f, "{}", item)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_come_back_in_reverse_order() {
        let mut stack = Stack::new();

        for value in 1..=5 {
            stack.push(value);
        }

        let popped: Vec<i64> = std::iter::from_fn(|| stack.pop()).collect();

        assert_eq!(popped, vec![5, 4, 3, 2, 1]);
        assert!(stack.is_empty());
    }

    #[test]
    fn empty_stack_has_nothing_to_give() {
        let mut stack: Stack<i64> = Stack::new();

        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut stack = Stack::new();
        stack.push(7);

        assert_eq!(stack.peek(), Some(&7));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn restore_returns_to_snapshot() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);

        let snapshot = stack.snapshot();

        stack.pop();
        stack.push(10);
        stack.push(20);
        stack.restore(snapshot);

        assert_eq!(stack.iter().copied().collect::<Vec<i64>>(), vec![1, 2]);
    }

    #[test]
    fn displays_bottom_to_top() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.to_string(), "1 2 3");
    }
}
