//! Wire interface to the two factory programs the composer drives.
//!
//! Both factories are Anchor programs; instructions are addressed by their
//! global sighash and arguments are borsh-encoded. The composer never reads
//! factory state: it derives the addresses the factories will create and
//! verifies the caller supplied the same accounts.

use anchor_lang::{
    prelude::*,
    solana_program::{
        instruction::{AccountMeta, Instruction},
        program::invoke,
        program_error::ProgramError,
    },
    system_program,
};
use solana_program::hash::{hashv, Hash};

/// Anchor global instruction discriminator: sha256("global:<name>")[..8]
fn sighash(name: &str) -> [u8; 8] {
    let digest = hashv(&[b"global:", name.as_bytes()]);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest.to_bytes()[..8]);
    discriminator
}

pub mod split {
    use super::*;

    pub const SEED: &[u8] = b"split";

    /// Arguments for the split factory's `create_split` instruction.
    ///
    /// A split with `controller == Pubkey::default()` is immutable; the
    /// factory rejects re-creating an immutable split that already exists.
    #[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
    pub struct CreateSplit {
        pub recipients: Vec<Pubkey>,
        pub percent_allocations: Vec<u32>,
        pub distributor_fee: u32,
        pub controller: Pubkey,
    }

    /// Content hash of the split tuple. The factory seeds the split PDA
    /// with this hash, so one tuple always resolves to one address.
    pub fn params_hash(
        recipients: &[Pubkey],
        percent_allocations: &[u32],
        distributor_fee: u32,
        controller: &Pubkey,
    ) -> Hash {
        let mut data =
            Vec::with_capacity(recipients.len() * 32 + percent_allocations.len() * 4 + 36);
        for recipient in recipients {
            data.extend_from_slice(recipient.as_ref());
        }
        for allocation in percent_allocations {
            data.extend_from_slice(&allocation.to_le_bytes());
        }
        data.extend_from_slice(&distributor_fee.to_le_bytes());
        data.extend_from_slice(controller.as_ref());
        hashv(&[data.as_slice()])
    }

    pub fn derive(split_factory: &Pubkey, params_hash: &Hash) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[SEED, params_hash.as_ref()], split_factory)
    }

    pub fn build_create_split(
        split_factory: &Pubkey,
        split: &Pubkey,
        payer: &Pubkey,
        args: &CreateSplit,
    ) -> Result<Instruction> {
        let mut data = sighash("create_split").to_vec();
        args.serialize(&mut data)
            .map_err(|_| ProgramError::InvalidInstructionData)?;

        Ok(Instruction {
            program_id: *split_factory,
            accounts: vec![
                AccountMeta::new(*split, false),
                AccountMeta::new(*payer, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }

    pub fn create_split<'info>(
        split_factory: &AccountInfo<'info>,
        split: &AccountInfo<'info>,
        payer: &AccountInfo<'info>,
        system_program: &AccountInfo<'info>,
        args: &CreateSplit,
    ) -> Result<()> {
        let instruction =
            build_create_split(&split_factory.key(), &split.key(), &payer.key(), args)?;
        invoke(
            &instruction,
            &[split.clone(), payer.clone(), system_program.clone()],
        )?;
        Ok(())
    }
}

pub mod waterfall {
    use super::*;

    pub const SEED: &[u8] = b"waterfall";

    /// Arguments for the waterfall factory's `create_waterfall_module`
    /// instruction.
    ///
    /// Factory contract: `thresholds.len() == recipients.len() - 1`, with
    /// the last recipient as the uncapped residual tranche, and thresholds
    /// strictly increasing. A nominated tranche index is resolved to that
    /// tranche's recipient by the factory; passing both a non-zero recipient
    /// and an index is rejected there as well.
    #[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
    pub struct CreateWaterfallModule {
        pub token: Pubkey,
        pub non_waterfall_recipient: Pubkey,
        pub non_waterfall_recipient_tranche_index: Option<u8>,
        pub recipients: Vec<Pubkey>,
        pub thresholds: Vec<u64>,
    }

    pub fn derive(waterfall_factory: &Pubkey, unique_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[SEED, unique_id.as_ref()], waterfall_factory)
    }

    pub fn build_create_waterfall_module(
        waterfall_factory: &Pubkey,
        waterfall: &Pubkey,
        unique_id: &Pubkey,
        payer: &Pubkey,
        args: &CreateWaterfallModule,
    ) -> Result<Instruction> {
        let mut data = sighash("create_waterfall_module").to_vec();
        args.serialize(&mut data)
            .map_err(|_| ProgramError::InvalidInstructionData)?;

        Ok(Instruction {
            program_id: *waterfall_factory,
            accounts: vec![
                AccountMeta::new(*waterfall, false),
                AccountMeta::new_readonly(*unique_id, false),
                AccountMeta::new(*payer, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }

    pub fn create_waterfall_module<'info>(
        waterfall_factory: &AccountInfo<'info>,
        waterfall: &AccountInfo<'info>,
        unique_id: &AccountInfo<'info>,
        payer: &AccountInfo<'info>,
        system_program: &AccountInfo<'info>,
        args: &CreateWaterfallModule,
    ) -> Result<()> {
        let instruction = build_create_waterfall_module(
            &waterfall_factory.key(),
            &waterfall.key(),
            &unique_id.key(),
            &payer.key(),
            args,
        )?;
        invoke(
            &instruction,
            &[
                waterfall.clone(),
                unique_id.clone(),
                payer.clone(),
                system_program.clone(),
            ],
        )?;
        Ok(())
    }
}
