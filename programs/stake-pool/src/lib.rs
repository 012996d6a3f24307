use anchor_lang::prelude::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "Stake Pool",
    project_url: "https://github.com/stake-pool",
    contacts: "email:security@stake-pool.dev",
    policy: "https://github.com/stake-pool/blob/main/SECURITY.md",
    source_code: "https://github.com/stake-pool"
}

declare_id!("EtcrfqFVjEDvMHys1Jpo6grkcPTX1Sx8XbkXnHWox5Nm");

pub const STAKE_VAULT_SEED: &str = "stake_vault";
pub const RESERVE_VAULT_SEED: &str = "reserve_vault";

pub mod error;
pub mod instructions;
pub mod registry;
pub mod rewards;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod stake_pool {

    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        minimal_stake: u64,
        stakeholders_limit: u64,
        next_stakeholders_limit: u64,
    ) -> Result<()> {
        instructions::initialize(
            ctx,
            admin,
            minimal_stake,
            stakeholders_limit,
            next_stakeholders_limit,
        )
    }

    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
        instructions::fund_reserve(ctx, amount)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn emergency_close_position(ctx: Context<EmergencyClosePosition>) -> Result<()> {
        instructions::emergency_close_position(ctx)
    }

    pub fn update_stakeholders_limit(ctx: Context<UpdateStakeholdersLimit>) -> Result<()> {
        instructions::update_stakeholders_limit(ctx)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
        instructions::transfer_ownership(ctx, new_admin)
    }
}
