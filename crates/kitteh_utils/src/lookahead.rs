//! A buffer that gives any item producer unlimited lookahead.
//!
//! Items are pulled from the producer lazily and cached, so the same item is
//! never produced twice. A peek cursor runs ahead of consumption; it can be
//! rewound one step at a time, reset to the front, or saved and restored
//! through a stack of checkpoints for nested speculative parsing.

use std::collections::VecDeque;

/// A source of items for a [`Lookahead`] buffer.
pub trait Produce {
    type Item: Clone;
    type Error;

    fn produce(&mut self) -> Result<Self::Item, Self::Error>;
}

pub struct Lookahead<P: Produce> {
    producer: P,
    buffer: VecDeque<P::Item>,

    // number of buffered items already handed out by `peek`
    cursor: usize,
    checkpoints: Vec<usize>,
}

impl<P: Produce> Lookahead<P> {
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            buffer: VecDeque::new(),
            cursor: 0,
            checkpoints: vec![],
        }
    }

    /// Returns the item under the cursor and advances the cursor past it.
    pub fn peek(&mut self) -> Result<P::Item, P::Error> {
        while self.buffer.len() <= self.cursor {
            let item = self.producer.produce()?;
            self.buffer.push_back(item);
        }

        let item = self.buffer[self.cursor].clone();
        self.cursor += 1;

        Ok(item)
    }

    /// Moves the cursor back by one item.
    pub fn unpeek(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor back to the front of the buffer.
    pub fn reset_peek(&mut self) {
        self.cursor = 0;
    }

    /// Removes and returns the front item, resetting the cursor.
    pub fn consume(&mut self) -> Result<P::Item, P::Error> {
        self.cursor = 0;

        match self.buffer.pop_front() {
            Some(item) => Ok(item),
            None => self.producer.produce(),
        }
    }

    pub fn save(&mut self) {
        self.checkpoints.push(self.cursor);
    }

    /// Rewinds the cursor to the most recent [`save`](Self::save).
    pub fn restore(&mut self) {
        let checkpoint = self.checkpoints.pop();
        debug_assert!(checkpoint.is_some(), "`restore` without a matching `save`");

        if let Some(cursor) = checkpoint {
            self.cursor = cursor;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn producer(&self) -> &P {
        &self.producer
    }

    pub fn producer_mut(&mut self) -> &mut P {
        &mut self.producer
    }
}

#[cfg(test)]
mod tests {
    use super::{Lookahead, Produce};

    struct Counter {
        produced: usize,
    }

    impl Produce for Counter {
        type Item = usize;
        type Error = ();

        fn produce(&mut self) -> Result<usize, ()> {
            self.produced += 1;
            Ok(self.produced)
        }
    }

    fn counter() -> Lookahead<Counter> {
        Lookahead::new(Counter { produced: 0 })
    }

    #[test]
    fn peek_runs_ahead_of_consume() {
        let mut items = counter();

        assert_eq!(items.peek(), Ok(1));
        assert_eq!(items.peek(), Ok(2));
        assert_eq!(items.peek(), Ok(3));

        assert_eq!(items.consume(), Ok(1));
        assert_eq!(items.cursor(), 0);
        assert_eq!(items.peek(), Ok(2));
    }

    #[test]
    fn items_are_produced_once() {
        let mut items = counter();

        items.peek().unwrap();
        items.peek().unwrap();
        items.reset_peek();
        items.peek().unwrap();
        items.peek().unwrap();

        assert_eq!(items.producer().produced, 2);
        assert_eq!(items.buffered(), 2);
    }

    #[test]
    fn unpeek_rewinds_one_item() {
        let mut items = counter();

        items.peek().unwrap();
        items.peek().unwrap();
        items.unpeek();
        assert_eq!(items.peek(), Ok(2));

        items.reset_peek();
        items.unpeek();
        assert_eq!(items.cursor(), 0);
    }

    #[test]
    fn nested_checkpoints() {
        let mut items = counter();

        items.save();
        assert_eq!(items.peek(), Ok(1));

        items.save();
        assert_eq!(items.peek(), Ok(2));
        assert_eq!(items.peek(), Ok(3));
        items.restore();

        assert_eq!(items.peek(), Ok(2));
        items.restore();

        assert_eq!(items.peek(), Ok(1));
    }

    #[test]
    fn consume_without_peek_pulls_from_producer() {
        let mut items = counter();

        assert_eq!(items.consume(), Ok(1));
        assert_eq!(items.consume(), Ok(2));
        assert_eq!(items.buffered(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without a matching `save`")]
    fn unbalanced_restore() {
        let mut items = counter();

        items.save();
        items.restore();
        items.restore();
    }
}
