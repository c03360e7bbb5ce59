use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod factory;
pub mod instructions;
pub mod state;
pub mod tranches;

use instructions::*;
use tranches::TrancheInput;

declare_id!("RECoupWfa11MASi45ub7Qe4ZE36UT5G6cU4ud8Fhhe4");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Cascade Recoup",
    project_url: "https://cascade-protocol.xyz",
    contacts: "email:hello@cascade-protocol.xyz,link:https://github.com/cascade-protocol/recoup/security",
    policy: "https://github.com/cascade-protocol/recoup/blob/main/SECURITY.md",
    source_code: "https://github.com/cascade-protocol/recoup",
    source_release: "v0.1.0"
}

#[program]
pub mod cascade_recoup {
    use super::*;

    /// Initializes the protocol configuration with the two factory programs
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        split_factory: Pubkey,
        waterfall_factory: Pubkey,
    ) -> Result<()> {
        instructions::initialize_protocol::handler(ctx, split_factory, waterfall_factory)
    }

    /// Composes a waterfall over the supplied tranches, creating an
    /// immutable split for every multi-recipient tranche and passing
    /// single recipients through as-is
    pub fn create_recoup<'info>(
        ctx: Context<'_, '_, 'info, 'info, CreateRecoup<'info>>,
        non_waterfall_recipient: Pubkey,
        non_waterfall_recipient_tranche_index: Option<u8>,
        distributor_fee: u32,
        tranches: Vec<TrancheInput>,
        thresholds: Vec<u64>,
    ) -> Result<()> {
        instructions::create_recoup::handler(
            ctx,
            non_waterfall_recipient,
            non_waterfall_recipient_tranche_index,
            distributor_fee,
            tranches,
            thresholds,
        )
    }
}
