use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::{
    errors::ErrorCode,
    events::RecoupCreated,
    factory::{split, waterfall},
    state::ProtocolConfig,
    tranches::{plan_payout_targets, PayoutTarget, TrancheInput},
};

#[derive(Accounts)]
pub struct CreateRecoup<'info> {
    #[account(
        seeds = [b"protocol_config"],
        bump = protocol_config.load()?.bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    /// CHECK: CPI target only - must match the factory recorded in the protocol config
    #[account(
        executable,
        constraint = split_factory_program.key() == protocol_config.load()?.split_factory
            @ ErrorCode::InvalidSplitFactory
    )]
    pub split_factory_program: AccountInfo<'info>,

    /// CHECK: CPI target only - must match the factory recorded in the protocol config
    #[account(
        executable,
        constraint = waterfall_factory_program.key() == protocol_config.load()?.waterfall_factory
            @ ErrorCode::InvalidWaterfallFactory
    )]
    pub waterfall_factory_program: AccountInfo<'info>,

    /// Token the waterfall will distribute
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: Used only as PDA seed for the new waterfall
    pub unique_id: AccountInfo<'info>,

    /// CHECK: Created by the waterfall factory - address verified against the derivation in the handler
    #[account(mut)]
    pub waterfall: AccountInfo<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Composes a waterfall over the supplied tranches: every multi-recipient
/// tranche gets a freshly created immutable split, single recipients pass
/// through untouched, and the ordered payout targets are handed to the
/// waterfall factory in one transaction.
///
/// remaining_accounts: the expected split PDA for each multi-recipient
/// tranche, in ascending tranche order.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, CreateRecoup<'info>>,
    non_waterfall_recipient: Pubkey,
    non_waterfall_recipient_tranche_index: Option<u8>,
    distributor_fee: u32,
    tranches: Vec<TrancheInput>,
    thresholds: Vec<u64>,
) -> Result<()> {
    // Phase 1: full validation before any effect
    let targets = plan_payout_targets(
        &tranches,
        &non_waterfall_recipient,
        non_waterfall_recipient_tranche_index,
    )?;

    let split_factory = ctx.accounts.split_factory_program.key();
    let waterfall_factory = ctx.accounts.waterfall_factory_program.key();

    let split_count = targets
        .iter()
        .filter(|target| matches!(target, PayoutTarget::NewSplit { .. }))
        .count();
    require!(
        ctx.remaining_accounts.len() >= split_count,
        ErrorCode::InsufficientRemainingAccounts
    );

    let (expected_waterfall, _) =
        waterfall::derive(&waterfall_factory, &ctx.accounts.unique_id.key());
    require_keys_eq!(
        ctx.accounts.waterfall.key(),
        expected_waterfall,
        ErrorCode::InvalidWaterfallAccount
    );

    // Phase 2: create a split per multi-recipient tranche, ascending order
    let mut recipients = Vec::with_capacity(targets.len());
    let mut split_cursor = 0usize;

    for target in &targets {
        match target {
            PayoutTarget::PassThrough(address) => recipients.push(*address),
            PayoutTarget::NewSplit {
                recipients: accounts,
                percent_allocations,
            } => {
                // Immutable split: no controller
                let controller = Pubkey::default();
                let params_hash =
                    split::params_hash(accounts, percent_allocations, distributor_fee, &controller);
                let (expected_split, _) = split::derive(&split_factory, &params_hash);

                let split_account = &ctx.remaining_accounts[split_cursor];
                require_keys_eq!(
                    split_account.key(),
                    expected_split,
                    ErrorCode::InvalidSplitAccount
                );

                split::create_split(
                    &ctx.accounts.split_factory_program,
                    split_account,
                    &ctx.accounts.payer.to_account_info(),
                    &ctx.accounts.system_program.to_account_info(),
                    &split::CreateSplit {
                        recipients: accounts.to_vec(),
                        percent_allocations: percent_allocations.to_vec(),
                        distributor_fee,
                        controller,
                    },
                )?;

                #[cfg(feature = "verbose")]
                msg!("tranche {}: created split {}", recipients.len(), expected_split);

                recipients.push(expected_split);
                split_cursor += 1;
            }
        }
    }

    // Phase 3: hand the ordered payout targets to the waterfall factory
    let tranche_count = recipients.len();
    waterfall::create_waterfall_module(
        &ctx.accounts.waterfall_factory_program,
        &ctx.accounts.waterfall,
        &ctx.accounts.unique_id,
        &ctx.accounts.payer.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        &waterfall::CreateWaterfallModule {
            token: ctx.accounts.mint.key(),
            non_waterfall_recipient,
            non_waterfall_recipient_tranche_index,
            recipients,
            thresholds,
        },
    )?;

    emit!(RecoupCreated {
        waterfall: ctx.accounts.waterfall.key(),
        mint: ctx.accounts.mint.key(),
        non_waterfall_recipient,
        tranche_count: tranche_count as u8,
        split_count: split_count as u8,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
