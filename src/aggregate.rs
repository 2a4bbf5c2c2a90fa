//! Running totals over a decoded record stream.

use crate::cents::Cents;
use crate::error::AggregateError;
use crate::record::{Record, RecordKind};

/// Watch user tracked when no other id is configured.
pub const DEFAULT_WATCH_USER_ID: u64 = 2_456_938_384_156_277_127;

/// Summary counters accumulated over a log.
///
/// # Invariants
///
/// - Every field is only changed by [`AggregateState::fold`] (or [`AggregateState::merge`],
///   which is the same additions applied in bulk)
/// - All money is exact integer cents; folding order never changes the result
/// - A sum that would overflow is an error, never a wrapped or partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateState {
    /// User whose net balance is tracked separately.
    pub watch_user_id: u64,

    pub total_debit: Cents,

    pub total_credit: Cents,

    pub autopay_start_count: u64,

    pub autopay_end_count: u64,

    /// Sum of every amount carried by the watch user's records.
    pub watch_user_balance: Cents,
}

impl AggregateState {
    /// Creates an all-zero state tracking `watch_user_id`.
    pub fn new(watch_user_id: u64) -> Self {
        AggregateState {
            watch_user_id,
            total_debit: Cents::ZERO,
            total_credit: Cents::ZERO,
            autopay_start_count: 0,
            autopay_end_count: 0,
            watch_user_balance: Cents::ZERO,
        }
    }

    /// Folds one record into the totals.
    ///
    /// The watch user's balance receives the raw amount for every kind, so
    /// debits and credits both add. Autopay records add zero. On overflow the
    /// state is left unchanged.
    pub fn fold(&mut self, record: &Record) -> Result<(), AggregateError> {
        let mut next = *self;

        if record.user_id == self.watch_user_id {
            next.watch_user_balance =
                add_cents(self.watch_user_balance, record.amount, "watch_user_balance")?;
        }

        match record.kind {
            RecordKind::Debit => {
                next.total_debit = add_cents(self.total_debit, record.amount, "total_debit")?
            }
            RecordKind::Credit => {
                next.total_credit = add_cents(self.total_credit, record.amount, "total_credit")?
            }
            RecordKind::AutopayStart => {
                next.autopay_start_count =
                    add_count(self.autopay_start_count, 1, "autopay_start_count")?
            }
            RecordKind::AutopayEnd => {
                next.autopay_end_count = add_count(self.autopay_end_count, 1, "autopay_end_count")?
            }
        }

        *self = next;
        Ok(())
    }

    /// Adds the counters of a state built over another slice of the same log.
    ///
    /// Both states must track the same watch user. On error `self` is left
    /// unchanged.
    pub fn merge(&mut self, other: &AggregateState) -> Result<(), AggregateError> {
        if self.watch_user_id != other.watch_user_id {
            return Err(AggregateError::WatchUserMismatch {
                expected: self.watch_user_id,
                found: other.watch_user_id,
            });
        }

        *self = AggregateState {
            watch_user_id: self.watch_user_id,
            total_debit: add_cents(self.total_debit, other.total_debit, "total_debit")?,
            total_credit: add_cents(self.total_credit, other.total_credit, "total_credit")?,
            autopay_start_count: add_count(
                self.autopay_start_count,
                other.autopay_start_count,
                "autopay_start_count",
            )?,
            autopay_end_count: add_count(
                self.autopay_end_count,
                other.autopay_end_count,
                "autopay_end_count",
            )?,
            watch_user_balance: add_cents(
                self.watch_user_balance,
                other.watch_user_balance,
                "watch_user_balance",
            )?,
        };
        Ok(())
    }
}

fn add_cents(total: Cents, amount: Cents, field: &'static str) -> Result<Cents, AggregateError> {
    total
        .checked_add(amount)
        .ok_or(AggregateError::Overflow { field })
}

fn add_count(total: u64, amount: u64, field: &'static str) -> Result<u64, AggregateError> {
    total
        .checked_add(amount)
        .ok_or(AggregateError::Overflow { field })
}

impl Default for AggregateState {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_USER_ID)
    }
}
