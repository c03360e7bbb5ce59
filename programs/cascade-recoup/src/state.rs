use anchor_lang::prelude::*;

/// Global protocol configuration (single instance)
///
/// The two factory addresses are written once at initialization and never
/// change afterwards; there is no update instruction.
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct ProtocolConfig {
    /// Authority that initialized the protocol (the program upgrade authority)
    pub authority: Pubkey,
    /// Split factory program used for multi-recipient tranches
    pub split_factory: Pubkey,
    /// Waterfall factory program that materializes the tranche sequence
    pub waterfall_factory: Pubkey,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
}

// Compile-time size assertion to catch accidental struct changes
// ProtocolConfig: discriminator (8) + authority (32) + split_factory (32) + waterfall_factory (32) + bump (1) = 105
const _: () = assert!(std::mem::size_of::<ProtocolConfig>() == 97); // 105 - 8 (discriminator added by Anchor)
