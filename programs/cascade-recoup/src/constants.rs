// Fixed-point percentage scale shared with the split factory
pub const PERCENTAGE_SCALE: u32 = 1_000_000; // 100%

// ProtocolConfig: discriminator (8) + authority (32) + split_factory (32)
// + waterfall_factory (32) + bump (1)
pub const PROTOCOL_CONFIG_SIZE: usize = 8 + 32 + 32 + 32 + 1; // 105 bytes
