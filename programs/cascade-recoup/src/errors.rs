use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Tranche recipients and percent allocations length mismatch")]
    TrancheRecipientsAndAllocationsMismatch,

    #[msg("Tranche must have at least one recipient")]
    EmptyTranche,

    #[msg("Single recipient tranche must be allocated the full percentage scale")]
    SingleRecipientAllocationNotFull,

    #[msg("Non-waterfall recipient tranche index exceeds the tranche count")]
    NonWaterfallRecipientIndexTooLarge,

    #[msg("Non-waterfall recipient given both as an address and as a tranche index")]
    NonWaterfallRecipientSetTwice,

    #[msg("Split factory program does not match the protocol config")]
    InvalidSplitFactory,

    #[msg("Waterfall factory program does not match the protocol config")]
    InvalidWaterfallFactory,

    #[msg("Split account does not match the derived split address")]
    InvalidSplitAccount,

    #[msg("Waterfall account does not match the derived waterfall address")]
    InvalidWaterfallAccount,

    #[msg("Not enough accounts provided in remaining_accounts")]
    InsufficientRemainingAccounts,

    #[msg("Factory address cannot be zero")]
    ZeroAddress,

    #[msg("Split and waterfall factories must be distinct programs")]
    DuplicateFactory,

    #[msg("Unauthorized")]
    Unauthorized,
}
