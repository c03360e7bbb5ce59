use anchor_lang::prelude::*;

use crate::{constants::PERCENTAGE_SCALE, errors::ErrorCode};

/// One waterfall tranche as supplied by the caller: the recipients that
/// share the tranche and their fixed-point percent allocations.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct TrancheInput {
    pub recipients: Vec<Pubkey>,
    pub percent_allocations: Vec<u32>,
}

/// Resolved payout target for one tranche.
///
/// A single-recipient tranche passes its address straight through to the
/// waterfall with no sub-call; anything larger gets a freshly created split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutTarget<'a> {
    PassThrough(Pubkey),
    NewSplit {
        recipients: &'a [Pubkey],
        percent_allocations: &'a [u32],
    },
}

/// Validates every tranche and decides pass-through vs new split.
///
/// Single index-ascending pass with no effects: the lowest-index violation
/// is the one reported, and nothing is created until the whole input has
/// been accepted. Per-tranche allocation sums, recipient bounds, and
/// threshold ordering are the factories' contracts, not checked here.
pub fn plan_payout_targets<'a>(
    tranches: &'a [TrancheInput],
    non_waterfall_recipient: &Pubkey,
    non_waterfall_recipient_tranche_index: Option<u8>,
) -> std::result::Result<Vec<PayoutTarget<'a>>, ErrorCode> {
    let mut targets = Vec::with_capacity(tranches.len());

    for (i, tranche) in tranches.iter().enumerate() {
        if tranche.recipients.len() != tranche.percent_allocations.len() {
            msg!(
                "tranche {}: {} recipients vs {} allocations",
                i,
                tranche.recipients.len(),
                tranche.percent_allocations.len()
            );
            return Err(ErrorCode::TrancheRecipientsAndAllocationsMismatch);
        }

        match tranche.recipients.as_slice() {
            [] => {
                msg!("tranche {}: no recipients", i);
                return Err(ErrorCode::EmptyTranche);
            }
            [single] => {
                let allocation = tranche.percent_allocations[0];
                if allocation != PERCENTAGE_SCALE {
                    msg!("tranche {}: single recipient allocated {}", i, allocation);
                    return Err(ErrorCode::SingleRecipientAllocationNotFull);
                }
                targets.push(PayoutTarget::PassThrough(*single));
            }
            _ => targets.push(PayoutTarget::NewSplit {
                recipients: &tranche.recipients,
                percent_allocations: &tranche.percent_allocations,
            }),
        }
    }

    if let Some(index) = non_waterfall_recipient_tranche_index {
        if usize::from(index) >= tranches.len() {
            msg!(
                "non-waterfall recipient tranche index {} with {} tranches",
                index,
                tranches.len()
            );
            return Err(ErrorCode::NonWaterfallRecipientIndexTooLarge);
        }
        if *non_waterfall_recipient != Pubkey::default() {
            return Err(ErrorCode::NonWaterfallRecipientSetTwice);
        }
    }

    Ok(targets)
}
