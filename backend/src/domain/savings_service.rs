//! Savings service domain logic.
//!
//! Validates deposits and withdrawals, applies them through the ledger, keeps
//! the single pending undo slot, and owns the one-time goal transition.
//!
//! ## Business Rules
//!
//! - Amounts are whole numbers in `1..=MAX_ENTRY_AMOUNT`
//! - Deposits are blocked once the total meets the goal
//! - Withdrawals may never take the total below zero, but stay allowed after
//!   the goal is reached
//! - Only the most recent deposit or withdrawal can be undone
//! - The goal-reached flag is set once and survives withdrawals; a reset keeps
//!   it unless configured otherwise

use log::{info, warn};
use shared::{ProgressSnapshot, ResetOutcome, SavingsEntry, SavingsEvent, SavingsOutcome, UndoOutcome};
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::domain::errors::{SavingsError, ValidationError};
use crate::domain::progress;
use crate::domain::validation::{validate_amount, MAX_ENTRY_AMOUNT};
use crate::storage::LedgerStorage;

pub type SavingsResult<T> = Result<T, SavingsError>;

const EVENT_CHANNEL_CAPACITY: usize = 16;

pub struct SavingsService<S: LedgerStorage> {
    ledger: S,
    goal: i64,
    reset_clears_goal_flag: bool,
    /// Id of the entry the next undo removes
    last_action_id: Option<i64>,
    events: broadcast::Sender<SavingsEvent>,
}

impl<S: LedgerStorage> SavingsService<S> {
    pub fn new(ledger: S, goal: i64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            ledger,
            goal,
            reset_clears_goal_flag: false,
            last_action_id: None,
            events,
        }
    }

    pub fn from_config(ledger: S, config: &AppConfig) -> Self {
        Self::new(ledger, config.savings_goal)
            .with_reset_clears_goal_flag(config.reset_clears_goal_flag)
    }

    pub fn with_reset_clears_goal_flag(mut self, enabled: bool) -> Self {
        self.reset_clears_goal_flag = enabled;
        self
    }

    pub fn goal(&self) -> i64 {
        self.goal
    }

    pub fn can_undo(&self) -> bool {
        self.last_action_id.is_some()
    }

    /// Receive goal events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SavingsEvent> {
        self.events.subscribe()
    }

    /// Record a deposit
    pub async fn add_savings(&mut self, amount: i64) -> SavingsResult<SavingsOutcome> {
        validate_amount(amount)?;

        let total = self.ledger.total_amount().await?;
        if total >= self.goal {
            info!("Rejected deposit of {}: goal already reached ({} / {})", amount, total, self.goal);
            return Err(SavingsError::GoalAlreadyReached { total, goal: self.goal });
        }
        let new_total = total
            .checked_add(amount)
            .ok_or(ValidationError::TooLarge(MAX_ENTRY_AMOUNT))?;

        let entry_id = self.ledger.add_entry(amount).await?;
        self.last_action_id = Some(entry_id);
        info!("Added {} to savings (entry {}), total now {}", amount, entry_id, new_total);

        let goal_just_reached = self.goal_transition_after_write(new_total).await;
        Ok(SavingsOutcome { entry_id, total: new_total, goal_just_reached })
    }

    /// Record a withdrawal
    pub async fn subtract_savings(&mut self, amount: i64) -> SavingsResult<SavingsOutcome> {
        validate_amount(amount)?;

        let total = self.ledger.total_amount().await?;
        if amount > total {
            info!("Rejected withdrawal of {}: only {} saved", amount, total);
            return Err(SavingsError::InsufficientFunds { requested: amount, available: total });
        }
        let new_total = total - amount;

        let entry_id = self.ledger.add_entry(-amount).await?;
        self.last_action_id = Some(entry_id);
        info!("Subtracted {} from savings (entry {}), total now {}", amount, entry_id, new_total);

        let goal_just_reached = self.goal_transition_after_write(new_total).await;
        Ok(SavingsOutcome { entry_id, total: new_total, goal_just_reached })
    }

    /// Remove the most recent deposit or withdrawal
    pub async fn undo_last(&mut self) -> SavingsResult<UndoOutcome> {
        let entry_id = self.last_action_id.ok_or(SavingsError::NothingToUndo)?;
        self.undo_entry(entry_id).await
    }

    /// Remove a specific entry the caller tracked as its last action.
    ///
    /// Only the entry in the pending undo slot can be undone; any other id
    /// fails with [`SavingsError::NothingToUndo`].
    pub async fn undo_entry(&mut self, entry_id: i64) -> SavingsResult<UndoOutcome> {
        if self.last_action_id != Some(entry_id) {
            return Err(SavingsError::NothingToUndo);
        }

        // All reads happen before the delete, so nothing can fail after it.
        let total_before = self.ledger.total_amount().await?;
        let amount = self.ledger.get_entry(entry_id).await?.map_or(0, |entry| entry.amount);
        if amount > total_before {
            warn!("Refusing to undo entry {}: total would drop below zero", entry_id);
            return Err(SavingsError::InsufficientFunds { requested: amount, available: total_before });
        }

        let entry_existed = self.ledger.delete_entry(entry_id).await?;
        self.last_action_id = None;

        let total = if entry_existed {
            total_before - amount
        } else {
            warn!("Undo target entry {} no longer exists", entry_id);
            total_before
        };
        info!("Undid entry {}, total now {}", entry_id, total);
        self.goal_transition_after_write(total).await;

        Ok(UndoOutcome { undone_entry_id: entry_id, entry_existed, total })
    }

    /// Delete every ledger entry
    pub async fn reset_all(&mut self) -> SavingsResult<ResetOutcome> {
        let goal_flag_cleared = self.reset_clears_goal_flag;
        let entries_removed = self.ledger.reset_ledger(goal_flag_cleared).await?;
        self.last_action_id = None;

        info!(
            "Reset savings: removed {} entries (goal flag cleared: {})",
            entries_removed, goal_flag_cleared
        );
        Ok(ResetOutcome { entries_removed, total: 0, goal_flag_cleared })
    }

    /// Set the goal-reached flag the first time `total` meets the goal.
    ///
    /// Returns true, and publishes [`SavingsEvent::GoalReached`], only on that
    /// first crossing.
    pub async fn evaluate_goal_transition(&self, total: i64) -> SavingsResult<bool> {
        if total < self.goal || self.ledger.is_goal_reached().await? {
            return Ok(false);
        }

        self.ledger.mark_goal_reached().await?;
        info!("Savings goal of {} reached with total {}", self.goal, total);

        // No subscribers is fine; the outcome flag still reports it.
        let _ = self.events.send(SavingsEvent::GoalReached { total, goal: self.goal });
        Ok(true)
    }

    /// Re-evaluate the goal transition against the stored total and return the
    /// current progress. Used when a presentation layer (re)draws.
    pub async fn refresh_progress(&self) -> SavingsResult<ProgressSnapshot> {
        let total = self.ledger.total_amount().await?;
        self.evaluate_goal_transition(total).await?;
        self.progress().await
    }

    pub async fn total_amount(&self) -> SavingsResult<i64> {
        Ok(self.ledger.total_amount().await?)
    }

    pub async fn progress(&self) -> SavingsResult<ProgressSnapshot> {
        let total = self.ledger.total_amount().await?;
        let goal_reached = self.ledger.is_goal_reached().await?;
        Ok(progress::snapshot(total, self.goal, goal_reached))
    }

    pub async fn entries(&self) -> SavingsResult<Vec<SavingsEntry>> {
        Ok(self.ledger.list_entries().await?)
    }

    // The ledger write already succeeded, so a failure here must not turn the
    // operation into an error. The flag stays unset and the next write or
    // refresh evaluates it again.
    async fn goal_transition_after_write(&self, total: i64) -> bool {
        match self.evaluate_goal_transition(total).await {
            Ok(fired) => fired,
            Err(e) => {
                warn!("Failed to update goal state: {}", e);
                false
            }
        }
    }
}
