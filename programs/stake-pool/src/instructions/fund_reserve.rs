use crate::error::ErrorCode;
use crate::states::*;
use crate::utils;
use crate::RESERVE_VAULT_SEED;
use anchor_lang::prelude::*;

/// Accounts context for `fund_reserve`.
///
/// Permissionless: anyone may add lamports to the reward reserve.
#[derive(Accounts)]
pub struct FundReserve<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [RESERVE_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub reserve_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::ZeroAmount);

    utils::transfer_to_vault(
        &ctx.accounts.funder.to_account_info(),
        &ctx.accounts.reserve_vault.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        amount,
    )?;
    msg!("Reserve funded with {}", amount);

    emit!(ReserveFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        timestamp: utils::unix_now()?,
    });
    Ok(())
}
