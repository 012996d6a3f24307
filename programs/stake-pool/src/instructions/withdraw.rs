use crate::states::*;
use crate::utils;
use crate::{RESERVE_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;

/// Accounts context for `withdraw`.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Withdrawing wallet; receives the payout.
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [STAKEHOLDER_SEED.as_bytes(), staker.key().as_ref()],
        bump = stakeholder.bump,
    )]
    pub stakeholder: Box<Account<'info, StakeholderAccount>>,

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

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = utils::unix_now()?;
    let staker = ctx.accounts.staker.key();

    let stakeholder: &mut StakeholderAccount = &mut ctx.accounts.stakeholder;
    let outcome = ctx
        .accounts
        .pool
        .withdraw_stake(&staker, stakeholder, amount, now)?;

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
        &ctx.accounts.staker.to_account_info(),
        &system_program,
        outcome.paid,
        ctx.accounts.pool.stake_vault_bump,
    )?;
    msg!("Withdrew {} for {}", outcome.paid, staker);

    if outcome.reward > 0 {
        emit!(RewardRealized {
            staker,
            reward: outcome.reward,
            cumulative_reward: ctx.accounts.stakeholder.cumulative_reward,
            timestamp: now,
        });
    }
    if outcome.closed {
        emit!(StakeholderRemoved {
            staker,
            timestamp: now,
        });
    } else {
        emit!(StakeholderDecreased {
            staker,
            value: outcome.result_clear_stake,
            timestamp: now,
        });
    }
    emit!(PaidOut {
        recipient: staker,
        amount: outcome.paid,
        timestamp: now,
    });
    emit!(Withdrawn {
        staker,
        paid: outcome.paid,
        closed: outcome.closed,
        timestamp: now,
    });
    Ok(())
}
