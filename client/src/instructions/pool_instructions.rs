use anchor_client::{Client, Cluster};
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};

use stake_pool::accounts as pool_accounts;
use stake_pool::instruction as pool_instructions;
use std::rc::Rc;

use crate::instructions::utils::get_pool_address;
use crate::instructions::utils::get_reserve_vault_address;
use crate::instructions::utils::get_stake_vault_address;
use crate::instructions::utils::get_stakeholder_address;

use super::super::{read_keypair_file, ClientConfig};

pub fn initialize_instr(
    config: &ClientConfig,
    admin: Pubkey,
    minimal_stake: u64,
    stakeholders_limit: u64,
    next_stakeholders_limit: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::Initialize {
            payer: program.payer(),
            pool: get_pool_address(&program.id()),
            stake_vault: get_stake_vault_address(&program.id()),
            reserve_vault: get_reserve_vault_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(pool_instructions::Initialize {
            admin,
            minimal_stake,
            stakeholders_limit,
            next_stakeholders_limit,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn fund_reserve_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::FundReserve {
            funder: program.payer(),
            reserve_vault: get_reserve_vault_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(pool_instructions::FundReserve { amount })
        .instructions()?;
    Ok(instructions)
}

/// Builds a deposit. `evicted` names the current worst stakeholder's wallet
/// when the pool is full and the payer is joining; the caller resolves it
/// from the on-chain registry beforehand.
pub fn deposit_instr(
    config: &ClientConfig,
    amount: u64,
    evicted: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::Deposit {
            staker: program.payer(),
            pool: get_pool_address(&program.id()),
            stakeholder: get_stakeholder_address(&program.payer(), &program.id()),
            stake_vault: get_stake_vault_address(&program.id()),
            reserve_vault: get_reserve_vault_address(&program.id()),
            evicted_stakeholder: evicted
                .map(|wallet| get_stakeholder_address(&wallet, &program.id())),
            evicted_wallet: evicted,
            system_program: system_program::id(),
        })
        .args(pool_instructions::Deposit { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::Withdraw {
            staker: program.payer(),
            pool: get_pool_address(&program.id()),
            stakeholder: get_stakeholder_address(&program.payer(), &program.id()),
            stake_vault: get_stake_vault_address(&program.id()),
            reserve_vault: get_reserve_vault_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(pool_instructions::Withdraw { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn emergency_close_position_instr(
    config: &ClientConfig,
    target: Pubkey,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::EmergencyClosePosition {
            admin: program.payer(),
            pool: get_pool_address(&program.id()),
            target,
            target_stakeholder: get_stakeholder_address(&target, &program.id()),
            stake_vault: get_stake_vault_address(&program.id()),
            reserve_vault: get_reserve_vault_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(pool_instructions::EmergencyClosePosition {})
        .instructions()?;
    Ok(instructions)
}

pub fn update_stakeholders_limit_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::UpdateStakeholdersLimit {
            admin: program.payer(),
            pool: get_pool_address(&program.id()),
        })
        .args(pool_instructions::UpdateStakeholdersLimit {})
        .instructions()?;
    Ok(instructions)
}

pub fn transfer_ownership_instr(
    config: &ClientConfig,
    new_admin: Pubkey,
) -> Result<Vec<Instruction>> {
    let admin = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(admin));
    let program = client.program(config.stake_pool_program)?;

    let instructions = program
        .request()
        .accounts(pool_accounts::TransferOwnership {
            admin: program.payer(),
            pool: get_pool_address(&program.id()),
        })
        .args(pool_instructions::TransferOwnership { new_admin })
        .instructions()?;
    Ok(instructions)
}
