//! Composition tests for create_recoup
//!
//! These drive the same pipeline the instruction handler walks: plan the
//! payout targets, derive the split PDA for every multi-recipient tranche,
//! build the factory instructions, and check the waterfall call that would
//! go out on the wire. The factories themselves are external programs, so
//! coverage stops at the built instructions.

mod helpers;

use anchor_lang::{prelude::Pubkey, AnchorDeserialize};
use cascade_recoup::{
    constants::PERCENTAGE_SCALE,
    errors::ErrorCode,
    factory::{split, waterfall},
    tranches::{plan_payout_targets, PayoutTarget, TrancheInput},
};
use helpers::{even_split, single};

/// Walks the handler's assembly phase off-chain: one create_split
/// instruction per NewSplit target, then the waterfall call with the
/// resolved recipient list.
fn compose(
    split_factory: &Pubkey,
    waterfall_factory: &Pubkey,
    unique_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    distributor_fee: u32,
    tranches: &[TrancheInput],
    thresholds: Vec<u64>,
) -> (
    Vec<anchor_lang::solana_program::instruction::Instruction>,
    anchor_lang::solana_program::instruction::Instruction,
) {
    let targets = plan_payout_targets(tranches, &Pubkey::default(), None).unwrap();

    let mut split_instructions = Vec::new();
    let mut recipients = Vec::with_capacity(targets.len());

    for target in &targets {
        match target {
            PayoutTarget::PassThrough(address) => recipients.push(*address),
            PayoutTarget::NewSplit {
                recipients: accounts,
                percent_allocations,
            } => {
                let controller = Pubkey::default();
                let hash =
                    split::params_hash(accounts, percent_allocations, distributor_fee, &controller);
                let (split_address, _) = split::derive(split_factory, &hash);

                split_instructions.push(
                    split::build_create_split(
                        split_factory,
                        &split_address,
                        payer,
                        &split::CreateSplit {
                            recipients: accounts.to_vec(),
                            percent_allocations: percent_allocations.to_vec(),
                            distributor_fee,
                            controller,
                        },
                    )
                    .unwrap(),
                );
                recipients.push(split_address);
            }
        }
    }

    let (waterfall_address, _) = waterfall::derive(waterfall_factory, unique_id);
    let waterfall_instruction = waterfall::build_create_waterfall_module(
        waterfall_factory,
        &waterfall_address,
        unique_id,
        payer,
        &waterfall::CreateWaterfallModule {
            token: *mint,
            non_waterfall_recipient: Pubkey::default(),
            non_waterfall_recipient_tranche_index: None,
            recipients,
            thresholds,
        },
    )
    .unwrap();

    (split_instructions, waterfall_instruction)
}

#[test]
fn test_two_even_tranches_create_two_splits_and_one_waterfall() {
    let split_factory = Pubkey::new_unique();
    let waterfall_factory = Pubkey::new_unique();
    let unique_id = Pubkey::new_unique();
    let payer = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    let tranches = vec![
        even_split(vec![Pubkey::new_unique(), Pubkey::new_unique()]),
        even_split(vec![Pubkey::new_unique(), Pubkey::new_unique()]),
    ];

    let (split_instructions, waterfall_instruction) = compose(
        &split_factory,
        &waterfall_factory,
        &unique_id,
        &payer,
        &mint,
        0,
        &tranches,
        vec![1],
    );

    assert_eq!(split_instructions.len(), 2);
    assert_ne!(
        split_instructions[0].accounts[0].pubkey,
        split_instructions[1].accounts[0].pubkey
    );
    for instruction in &split_instructions {
        assert_eq!(instruction.program_id, split_factory);
    }

    let args =
        waterfall::CreateWaterfallModule::try_from_slice(&waterfall_instruction.data[8..]).unwrap();
    assert_eq!(args.token, mint);
    assert_eq!(args.recipients.len(), 2);
    assert_eq!(args.thresholds, vec![1]);
    assert_eq!(args.recipients.len(), args.thresholds.len() + 1);
    assert_eq!(args.recipients[0], split_instructions[0].accounts[0].pubkey);
    assert_eq!(args.recipients[1], split_instructions[1].accounts[0].pubkey);
}

#[test]
fn test_all_single_tranches_pass_through_unchanged() {
    let recipients: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
    let tranches: Vec<TrancheInput> = recipients.iter().map(|r| single(*r)).collect();

    let (split_instructions, waterfall_instruction) = compose(
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        0,
        &tranches,
        vec![100, 200],
    );

    assert!(split_instructions.is_empty());

    let args =
        waterfall::CreateWaterfallModule::try_from_slice(&waterfall_instruction.data[8..]).unwrap();
    assert_eq!(args.recipients, recipients);
}

#[test]
fn test_mixed_tranches_keep_waterfall_positions() {
    let split_factory = Pubkey::new_unique();
    let solo = Pubkey::new_unique();
    let residual = Pubkey::new_unique();
    let tranches = vec![
        single(solo),
        even_split(vec![Pubkey::new_unique(), Pubkey::new_unique()]),
        single(residual),
    ];

    let (split_instructions, waterfall_instruction) = compose(
        &split_factory,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        0,
        &tranches,
        vec![500, 1_000],
    );

    assert_eq!(split_instructions.len(), 1);

    let args =
        waterfall::CreateWaterfallModule::try_from_slice(&waterfall_instruction.data[8..]).unwrap();
    assert_eq!(args.recipients.len(), 3);
    assert_eq!(args.recipients[0], solo);
    assert_eq!(args.recipients[1], split_instructions[0].accounts[0].pubkey);
    assert_eq!(args.recipients[2], residual);
}

#[test]
fn test_same_tranche_tuple_derives_same_split_across_compositions() {
    let split_factory = Pubkey::new_unique();
    let tranche = even_split(vec![Pubkey::new_unique(), Pubkey::new_unique()]);
    let tranches = vec![tranche, single(Pubkey::new_unique())];

    let (first, _) = compose(
        &split_factory,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        0,
        &tranches,
        vec![10],
    );
    let (second, _) = compose(
        &split_factory,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        0,
        &tranches,
        vec![10],
    );

    assert_eq!(first[0].accounts[0].pubkey, second[0].accounts[0].pubkey);
}

#[test]
fn test_distributor_fee_changes_split_address() {
    let split_factory = Pubkey::new_unique();
    let tranches = vec![
        even_split(vec![Pubkey::new_unique(), Pubkey::new_unique()]),
        single(Pubkey::new_unique()),
    ];

    let (zero_fee, _) = compose(
        &split_factory,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        0,
        &tranches,
        vec![10],
    );
    let (with_fee, _) = compose(
        &split_factory,
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        10_000,
        &tranches,
        vec![10],
    );

    assert_ne!(zero_fee[0].accounts[0].pubkey, with_fee[0].accounts[0].pubkey);
}

#[test]
fn test_waterfall_address_follows_unique_id() {
    let waterfall_factory = Pubkey::new_unique();
    let first_id = Pubkey::new_unique();
    let second_id = Pubkey::new_unique();

    assert_eq!(
        waterfall::derive(&waterfall_factory, &first_id),
        waterfall::derive(&waterfall_factory, &first_id)
    );
    assert_ne!(
        waterfall::derive(&waterfall_factory, &first_id).0,
        waterfall::derive(&waterfall_factory, &second_id).0
    );
}

#[test]
fn test_empty_first_tranche_rejected_before_any_instruction() {
    let tranches = vec![
        TrancheInput {
            recipients: vec![],
            percent_allocations: vec![],
        },
        single(Pubkey::new_unique()),
    ];

    assert!(matches!(
        plan_payout_targets(&tranches, &Pubkey::default(), None),
        Err(ErrorCode::EmptyTranche)
    ));
}

#[test]
fn test_partial_single_allocation_rejected_before_any_instruction() {
    let tranches = vec![TrancheInput {
        recipients: vec![Pubkey::new_unique()],
        percent_allocations: vec![100_000],
    }];

    assert!(matches!(
        plan_payout_targets(&tranches, &Pubkey::default(), None),
        Err(ErrorCode::SingleRecipientAllocationNotFull)
    ));
}

#[test]
fn test_nominated_index_at_tranche_count_rejected() {
    let tranches = vec![single(Pubkey::new_unique()), single(Pubkey::new_unique())];

    assert!(matches!(
        plan_payout_targets(&tranches, &Pubkey::default(), Some(2)),
        Err(ErrorCode::NonWaterfallRecipientIndexTooLarge)
    ));
    assert!(plan_payout_targets(&tranches, &Pubkey::default(), Some(1)).is_ok());
}

#[test]
fn test_full_scale_single_allocation_is_the_only_accepted_value() {
    for allocation in [1, PERCENTAGE_SCALE - 1, PERCENTAGE_SCALE + 1] {
        let tranches = vec![TrancheInput {
            recipients: vec![Pubkey::new_unique()],
            percent_allocations: vec![allocation],
        }];
        assert!(plan_payout_targets(&tranches, &Pubkey::default(), None).is_err());
    }

    let tranches = vec![single(Pubkey::new_unique())];
    assert!(plan_payout_targets(&tranches, &Pubkey::default(), None).is_ok());
}
