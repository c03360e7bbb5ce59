use anchor_lang::prelude::*;

#[event]
pub struct ProtocolConfigCreated {
    pub authority: Pubkey,
    pub split_factory: Pubkey,
    pub waterfall_factory: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RecoupCreated {
    pub waterfall: Pubkey,
    pub mint: Pubkey,
    pub non_waterfall_recipient: Pubkey,
    pub tranche_count: u8,
    pub split_count: u8,
    pub timestamp: i64,
}
