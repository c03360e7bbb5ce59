//! Shared builders for composition tests

use anchor_lang::prelude::Pubkey;
use cascade_recoup::{constants::PERCENTAGE_SCALE, tranches::TrancheInput};

pub fn single(recipient: Pubkey) -> TrancheInput {
    TrancheInput {
        recipients: vec![recipient],
        percent_allocations: vec![PERCENTAGE_SCALE],
    }
}

pub fn even_split(recipients: Vec<Pubkey>) -> TrancheInput {
    let share = PERCENTAGE_SCALE / recipients.len() as u32;
    TrancheInput {
        percent_allocations: vec![share; recipients.len()],
        recipients,
    }
}
