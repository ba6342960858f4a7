//! Unstake flow — drives an unstake dialog for a dapp-staking position.
//!
//! The flow wraps a [`SelectionPolicy`] over the position's targets,
//! validates the requested amount against what is staked, and hands the
//! prepared call to the external signer. It completes once the status
//! stream reports the transaction in a block. A failed signing attempt
//! is surfaced inline and leaves the flow open for another try.

use rust_decimal::Decimal;

use lantern_common::error::LanternError;
use lantern_common::traits::ExtrinsicSigner;
use lantern_common::types::{StakeTarget, TxStatus};

use crate::selection::SelectionPolicy;

/// A stake position: what the account has staked, and where.
#[derive(Debug, Clone)]
pub struct StakePosition {
    pub account: String,
    /// Total amount available to unstake, in whole tokens.
    pub available: Decimal,
    pub targets: Vec<StakeTarget>,
}

pub struct UnstakeFlow {
    policy: SelectionPolicy,
    account: String,
    available: Decimal,
    amount: Option<Decimal>,
    /// Inline error shown next to the input; never fatal to the flow.
    error: Option<String>,
    submitted: bool,
}

impl UnstakeFlow {
    pub fn new(position: StakePosition) -> Self {
        Self {
            policy: SelectionPolicy::from_targets(position.targets),
            account: position.account,
            available: position.available,
            amount: None,
            error: None,
            submitted: false,
        }
    }

    /// Whether there is anything to unstake from at all. A position
    /// with no targets renders nothing — deliberately not an error.
    pub fn is_noop(&self) -> bool {
        self.policy == SelectionPolicy::NoTarget
    }

    /// Whether the user still has to pick a target.
    pub fn needs_pick(&self) -> bool {
        self.policy.needs_pick()
    }

    pub fn candidates(&self) -> &[StakeTarget] {
        self.policy.candidates()
    }

    /// Forwarded to the policy; one-way.
    pub fn pick(&mut self, target_id: &str) -> bool {
        self.policy.pick(target_id)
    }

    pub fn target(&self) -> Option<&StakeTarget> {
        self.policy.resolved()
    }

    pub fn available(&self) -> Decimal {
        self.available
    }

    /// Set the amount to unstake. Rejections stay inline: the amount is
    /// cleared and `error` explains why, but the dialog stays open.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.error = None;
        if amount <= Decimal::ZERO {
            self.amount = None;
            self.error = Some("Amount must be greater than zero".to_string());
        } else if amount > self.available {
            self.amount = None;
            self.error = Some(format!("Only {} available to unstake", self.available));
        } else {
            self.amount = Some(amount);
        }
    }

    /// Shortcut for the max button.
    pub fn set_max(&mut self) {
        self.set_amount(self.available);
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    /// The stake remaining after this unstake, once an amount is set.
    pub fn resulting(&self) -> Option<Decimal> {
        self.amount.map(|a| self.available - a)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ready to confirm: target resolved, amount valid, not in flight.
    pub fn ready(&self) -> bool {
        self.policy.resolved().is_some() && self.amount.is_some() && !self.submitted
    }

    /// Sign and submit, then watch the status stream. Returns `true`
    /// when the transaction made it into a block and the dialog should
    /// dismiss. Signing failures are recorded inline and the flow is
    /// reopened for a retry.
    pub async fn confirm(&mut self, signer: &dyn ExtrinsicSigner, call: &str) -> bool {
        if !self.ready() {
            return false;
        }
        self.submitted = true;
        self.error = None;

        let mut statuses = match signer.sign_and_send(call, &self.account).await {
            Ok(statuses) => statuses,
            Err(e) => {
                self.fail(e);
                return false;
            }
        };

        while let Some(status) = statuses.recv().await {
            match status {
                TxStatus::InBlock | TxStatus::Finalized => return true,
                TxStatus::Failed(reason) => {
                    self.fail(LanternError::Signing(reason));
                    return false;
                }
                TxStatus::Broadcast => {}
            }
        }

        // Stream closed without a terminal state.
        self.fail(LanternError::Signing("status stream closed".to_string()));
        false
    }

    fn fail(&mut self, error: LanternError) {
        self.error = Some(error.to_string());
        self.submitted = false;
    }
}
