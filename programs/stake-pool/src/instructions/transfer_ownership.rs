use crate::error::ErrorCode;
use crate::states::*;
use crate::utils;
use anchor_lang::prelude::*;

/// Accounts context for `transfer_ownership`.
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(
        constraint = admin.key() == pool.admin @ ErrorCode::NotOwner
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,
}

pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
    require_keys_neq!(new_admin, Pubkey::default(), ErrorCode::ZeroAddress);

    let pool = &mut ctx.accounts.pool;
    let previous_admin = pool.admin;
    pool.admin = new_admin;
    msg!("Pool admin changed to {}", new_admin);

    emit!(OwnershipTransferred {
        previous_admin,
        new_admin,
        timestamp: utils::unix_now()?,
    });
    Ok(())
}
