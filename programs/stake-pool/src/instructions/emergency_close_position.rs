use crate::error::ErrorCode;
use crate::states::*;
use crate::utils;
use crate::{RESERVE_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;

/// Accounts context for `emergency_close_position`.
///
/// Admin-only full close of an arbitrary active position. The target
/// receives its entire live balance, exactly as a full self-withdrawal
/// would pay.
#[derive(Accounts)]
pub struct EmergencyClosePosition<'info> {
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

    /// Wallet whose position is being closed; receives the payout.
    ///
    /// CHECK: bound to the target ledger through its PDA seeds.
    #[account(mut)]
    pub target: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [STAKEHOLDER_SEED.as_bytes(), target.key().as_ref()],
        bump = target_stakeholder.bump,
    )]
    pub target_stakeholder: Box<Account<'info, StakeholderAccount>>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump = pool.stake_vault_bump,
    )]
    pub stake_vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [RESERVE_VAULT_SEED.as_bytes()],
        bump = pool.reserve_vault_bump,
    )]
    pub reserve_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn emergency_close_position(ctx: Context<EmergencyClosePosition>) -> Result<()> {
    let now = utils::unix_now()?;
    let target = ctx.accounts.target.key();

    let stakeholder: &mut StakeholderAccount = &mut ctx.accounts.target_stakeholder;
    let outcome = ctx
        .accounts
        .pool
        .close_position(&target, stakeholder, now)?;

    let system_program = ctx.accounts.system_program.to_account_info();
    let stake_vault = ctx.accounts.stake_vault.to_account_info();
    utils::pull_from_reserve(
        &ctx.accounts.reserve_vault.to_account_info(),
        &stake_vault,
        &system_program,
        outcome.reward,
        ctx.accounts.pool.reserve_vault_bump,
    )?;
    utils::pay_from_stake_vault(
        &stake_vault,
        &ctx.accounts.target.to_account_info(),
        &system_program,
        outcome.payout,
        ctx.accounts.pool.stake_vault_bump,
    )?;
    msg!("Emergency closed position of {}", target);

    if outcome.reward > 0 {
        emit!(RewardRealized {
            staker: target,
            reward: outcome.reward,
            cumulative_reward: ctx.accounts.target_stakeholder.cumulative_reward,
            timestamp: now,
        });
    }
    emit!(StakeholderRemoved {
        staker: target,
        timestamp: now,
    });
    emit!(PaidOut {
        recipient: target,
        amount: outcome.payout,
        timestamp: now,
    });
    emit!(PositionClosed {
        staker: target,
        payout: outcome.payout,
        timestamp: now,
    });
    Ok(())
}
