use std::collections::VecDeque;

use crate::{token::Token, types::TokenId};

/// Fixed-capacity FIFO of booked routine tokens.
#[derive(Debug)]
pub struct RoutineQueue {
    tokens: VecDeque<Token>,
    capacity: usize,
}

impl RoutineQueue {
    /// Empty queue holding at most `capacity` tokens (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tokens: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `token`; returns false without mutating when full.
    pub fn enqueue(&mut self, token: Token) -> bool {
        if self.is_full() {
            return false;
        }
        self.tokens.push_back(token);
        true
    }

    /// Removes and returns the oldest token.
    pub fn dequeue(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Oldest token, left in place.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Removes the token with `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: TokenId) -> Option<Token> {
        let pos = self.tokens.iter().position(|t| t.id == id)?;
        self.tokens.remove(pos)
    }

    /// Tokens oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Number of queued tokens.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Maximum number of queued tokens.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no more tokens fit.
    pub fn is_full(&self) -> bool {
        self.tokens.len() >= self.capacity
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
