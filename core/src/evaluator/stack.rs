use crate::{Vec, evaluator::EvalError};

/// A value stack with a hard maximum depth.
///
/// Storage grows with the values actually pushed, so the limit costs
/// nothing until it is reached. Every overflow and underflow is reported as
/// an [`EvalError`] instead of panicking.
///
/// # Examples
///
/// ```
/// use tally_core::evaluator::ValueStack;
///
/// let mut stack = ValueStack::new(2);
/// stack.push(1.0).unwrap();
/// stack.push(2.0).unwrap();
/// assert!(stack.push(3.0).is_err());
/// assert_eq!(stack.pop_pair(), Ok((1.0, 2.0)));
/// assert!(stack.is_empty());
/// ```
#[derive(Debug)]
pub struct ValueStack {
    items: Vec<f64>,
    max_depth: usize,
}

impl ValueStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            items: Vec::new(),
            max_depth,
        }
    }

    /// Pushes a value, failing if the stack is already at maximum depth.
    #[inline]
    pub fn push(&mut self, value: f64) -> Result<(), EvalError> {
        if self.items.len() == self.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.items.len() + 1,
                max_depth: self.max_depth,
            });
        }
        self.items.push(value);
        Ok(())
    }

    /// Removes and returns the top value.
    #[inline]
    pub fn pop(&mut self) -> Result<f64, EvalError> {
        self.items.pop().ok_or(EvalError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Removes the top two values and returns them in push order `(lhs, rhs)`.
    ///
    /// Leaves the stack untouched when fewer than two values are present.
    pub fn pop_pair(&mut self) -> Result<(f64, f64), EvalError> {
        let len = self.items.len();
        if len < 2 {
            return Err(EvalError::StackUnderflow {
                needed: 2,
                available: len,
            });
        }
        let (lhs, rhs) = (self.items[len - 2], self.items[len - 1]);
        self.items.truncate(len - 2);
        Ok((lhs, rhs))
    }

    /// Returns a mutable reference to the top value.
    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut f64, EvalError> {
        self.items.last_mut().ok_or(EvalError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = ValueStack::new(4);
        stack.push(1.5).unwrap();
        stack.push(-2.0).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok(-2.0));
        assert_eq!(stack.pop(), Ok(1.5));
        assert_eq!(
            stack.pop(),
            Err(EvalError::StackUnderflow {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_overflow_at_max_depth() {
        let mut stack = ValueStack::new(2);
        stack.push(1.0).unwrap();
        stack.push(2.0).unwrap();
        assert_eq!(
            stack.push(3.0),
            Err(EvalError::StackOverflow {
                depth: 3,
                max_depth: 2
            })
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_zero_depth_rejects_everything() {
        let mut stack = ValueStack::new(0);
        assert!(stack.push(0.0).is_err());
        assert!(stack.peek_mut().is_err());
    }

    #[test]
    fn test_unbounded_depth_reserves_nothing() {
        let mut stack = ValueStack::new(usize::MAX);
        for i in 0..100 {
            stack.push(f64::from(i)).unwrap();
        }
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.pop(), Ok(99.0));
    }

    #[test]
    fn test_pop_pair_order_and_underflow() {
        let mut stack = ValueStack::new(8);
        stack.push(10.0).unwrap();
        assert_eq!(
            stack.pop_pair(),
            Err(EvalError::StackUnderflow {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(stack.len(), 1);

        stack.push(4.0).unwrap();
        stack.push(5.0).unwrap();
        assert_eq!(stack.pop_pair(), Ok((4.0, 5.0)));
        assert_eq!(stack.pop(), Ok(10.0));
    }

    #[test]
    fn test_peek_mut_updates_top() {
        let mut stack = ValueStack::new(2);
        stack.push(3.0).unwrap();
        *stack.peek_mut().unwrap() *= -1.0;
        assert_eq!(stack.pop(), Ok(-3.0));
    }
}
