//! Per-product request sequencing.
//!
//! Quantity changes for one product can be in flight at the same time and
//! their responses can arrive in any order. Each request takes a ticket;
//! only the response carrying the latest ticket for its product may touch
//! view state.

use std::collections::HashMap;

use lumen_core::ProductId;

/// Proof that a request was issued, checked when its response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    product_id: ProductId,
    seq: u64,
}

impl Ticket {
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

/// Issues tickets and remembers the latest one per product.
#[derive(Debug, Default)]
pub struct RequestSequence {
    next: u64,
    latest: HashMap<ProductId, u64>,
}

impl RequestSequence {
    /// Issue a ticket for `product_id`, superseding any earlier one.
    pub fn issue(&mut self, product_id: &ProductId) -> Ticket {
        self.next += 1;
        self.latest.insert(product_id.clone(), self.next);
        Ticket {
            product_id: product_id.clone(),
            seq: self.next,
        }
    }

    /// Whether `ticket` is still the newest for its product.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.product_id) == Some(&ticket.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut sequence = RequestSequence::default();
        let id = ProductId::from("p1");

        let first = sequence.issue(&id);
        let second = sequence.issue(&id);

        assert!(!sequence.is_current(&first));
        assert!(sequence.is_current(&second));
    }

    #[test]
    fn test_products_are_sequenced_independently() {
        let mut sequence = RequestSequence::default();
        let a = sequence.issue(&ProductId::from("a"));
        let b = sequence.issue(&ProductId::from("b"));

        assert!(sequence.is_current(&a));
        assert!(sequence.is_current(&b));
        assert_eq!(a.product_id().as_str(), "a");
    }
}
