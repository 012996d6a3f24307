use crate::error::ErrorCode;
use crate::states::*;
use crate::utils;
use anchor_lang::prelude::*;

/// Accounts context for `update_stakeholders_limit`.
#[derive(Accounts)]
pub struct UpdateStakeholdersLimit<'info> {
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

/// Raises the capacity to the preconfigured next limit. One-shot.
pub fn update_stakeholders_limit(ctx: Context<UpdateStakeholdersLimit>) -> Result<()> {
    let (previous_limit, new_limit) = ctx.accounts.pool.update_stakeholders_limit()?;
    msg!("Stakeholders limit raised {} -> {}", previous_limit, new_limit);

    emit!(StakeholdersLimitUpdated {
        previous_limit,
        new_limit,
        timestamp: utils::unix_now()?,
    });
    Ok(())
}
