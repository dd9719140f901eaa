//! Error kinds for the order book and feed dispatcher.
//!
//! All variants are recoverable: `process_command` catches one of these,
//! reports it once on the error sink, and moves on to the next line.

use thiserror::Error;

/// Everything that can go wrong handling a single feed line.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FeedError {
    #[error("incorrect command")]
    UnknownCommand,

    #[error("invalid number of parameters")]
    ArityMismatch,

    #[error("invalid order id")]
    InvalidOrderId,

    #[error("invalid symbol")]
    InvalidSymbol,

    #[error("invalid side")]
    InvalidSide,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("invalid price")]
    InvalidPrice,

    #[error("This order already exist: {0}")]
    DuplicateOrder(u64),

    #[error("This order does not exist: {0}")]
    UnknownOrder(u64),

    #[error("No order book for {0}")]
    NoOrderBookForOrder(u64),
}

pub type Result<T> = std::result::Result<T, FeedError>;
