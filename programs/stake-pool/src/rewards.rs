use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Flat reward accrued by every active staker, in lamport base units per
/// second of membership. The rate is identical for all stakers regardless
/// of stake size.
pub const REWARD_PER_SECOND: u64 = 1_982_496_194_824_962;

/// Reward accrued between `last_update_at` and `now`, both UNIX seconds.
///
/// The product is taken in `u128` and checked back into `u64`; a clock that
/// ran backwards or a product past `u64::MAX` is an error, never a wrap.
pub fn pending(last_update_at: u64, now: u64) -> Result<u64> {
    let elapsed = now
        .checked_sub(last_update_at)
        .ok_or(error!(ErrorCode::InvalidTimestamp))?;
    let accrued = (REWARD_PER_SECOND as u128)
        .checked_mul(elapsed as u128)
        .ok_or(error!(ErrorCode::Overflow))?;
    u64::try_from(accrued).map_err(|_| error!(ErrorCode::Overflow))
}
