#![allow(dead_code)]
use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

use stake_pool::registry::GUARD;
use stake_pool::states::{Pool, StakeholderAccount};

mod instructions;
use instructions::pool_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    stake_pool_program: Pubkey,
}

fn load_cfg(client_config: &String) -> Result<ClientConfig> {
    let mut config = Ini::new();
    let _map = config.load(client_config).unwrap();
    let http_url = config.get("Global", "http_url").unwrap();
    if http_url.is_empty() {
        panic!("http_url must not be empty");
    }
    let ws_url = config.get("Global", "ws_url").unwrap();
    if ws_url.is_empty() {
        panic!("ws_url must not be empty");
    }
    let payer_path = config.get("Global", "payer_path").unwrap();
    if payer_path.is_empty() {
        panic!("payer_path must not be empty");
    }
    let admin_path = config.get("Global", "admin_path").unwrap();
    if admin_path.is_empty() {
        panic!("admin_path must not be empty");
    }

    let stake_pool_program_str = config.get("Global", "stake_pool_program").unwrap();
    if stake_pool_program_str.is_empty() {
        panic!("stake_pool_program must not be empty");
    }
    let stake_pool_program = Pubkey::from_str(&stake_pool_program_str).unwrap();

    Ok(ClientConfig {
        http_url,
        ws_url,
        payer_path,
        admin_path,
        stake_pool_program,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: PoolCommands,
}

#[derive(Debug, Parser)]
pub enum PoolCommands {
    Initialize {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        minimal_stake: u64,
        #[arg(long)]
        stakeholders_limit: u64,
        #[arg(long)]
        next_stakeholders_limit: u64,
    },
    FundReserve {
        #[arg(long)]
        amount: u64,
    },
    Deposit {
        #[arg(long)]
        amount: u64,
    },
    Withdraw {
        #[arg(long)]
        amount: u64,
    },
    EmergencyClosePosition {
        #[arg(long)]
        target: Pubkey,
    },
    UpdateStakeholdersLimit {},
    TransferOwnership {
        #[arg(long)]
        new_admin: Pubkey,
    },
    PoolInfo {},
    Stakeholders {},
    StakeOf {
        #[arg(long)]
        wallet: Pubkey,
    },
    WorstStakeholder {},
    NextStakeholder {
        /// Omit to start enumeration from the guard sentinel.
        #[arg(long)]
        wallet: Option<Pubkey>,
    },
}

fn fetch_pool(rpc_client: &RpcClient, config: &ClientConfig) -> Result<Pool> {
    let pool_address = get_pool_address(&config.stake_pool_program);
    let account = rpc_client.get_account(&pool_address)?;
    deserialize_anchor_account::<Pool>(&account)
}

fn fetch_stakeholder(
    rpc_client: &RpcClient,
    config: &ClientConfig,
    wallet: &Pubkey,
) -> Result<StakeholderAccount> {
    let address = get_stakeholder_address(wallet, &config.stake_pool_program);
    let account = rpc_client.get_account(&address)?;
    deserialize_anchor_account::<StakeholderAccount>(&account)
}

fn chain_now(rpc_client: &RpcClient) -> Result<u64> {
    let slot = rpc_client.get_slot()?;
    let time = rpc_client.get_block_time(slot)?;
    u64::try_from(time).map_err(|_| format_err!("negative block time"))
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let pool_config = load_cfg(&client_config.to_string()).unwrap();
    // cluster params.
    let payer = read_keypair_file(&pool_config.payer_path)?;
    let admin = read_keypair_file(&pool_config.admin_path)?;
    // solana rpc client
    let rpc_client = RpcClient::new(pool_config.http_url.to_string());

    let opts = Opts::parse();
    match opts.command {
        PoolCommands::Initialize {
            admin: pool_admin,
            minimal_stake,
            stakeholders_limit,
            next_stakeholders_limit,
        } => {
            let mut instructions = Vec::new();
            let initialize_ix = initialize_instr(
                &pool_config,
                pool_admin,
                minimal_stake,
                stakeholders_limit,
                next_stakeholders_limit,
            )?;
            instructions.extend(initialize_ix);
            let signers = vec![&payer];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&payer.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::FundReserve { amount } => {
            let mut instructions = Vec::new();
            let fund_ix = fund_reserve_instr(&pool_config, amount)?;
            instructions.extend(fund_ix);
            let signers = vec![&payer];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&payer.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::Deposit { amount } => {
            // A joining deposit against a full pool must name the worst
            // stakeholder so the program can pay out the evicted position.
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            let joining = !pool.registry.contains(&payer.pubkey());
            let full = pool.registry.count() >= pool.stakeholders_limit;
            let evicted = if joining && full {
                Some(pool.registry.worst().0)
            } else {
                None
            };

            let mut instructions = Vec::new();
            let deposit_ix = deposit_instr(&pool_config, amount, evicted)?;
            instructions.extend(deposit_ix);
            let signers = vec![&payer];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&payer.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::Withdraw { amount } => {
            let mut instructions = Vec::new();
            let withdraw_ix = withdraw_instr(&pool_config, amount)?;
            instructions.extend(withdraw_ix);
            let signers = vec![&payer];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&payer.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::EmergencyClosePosition { target } => {
            let mut instructions = Vec::new();
            let close_ix = emergency_close_position_instr(&pool_config, target)?;
            instructions.extend(close_ix);
            let signers = vec![&admin];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&admin.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::UpdateStakeholdersLimit {} => {
            let mut instructions = Vec::new();
            let update_ix = update_stakeholders_limit_instr(&pool_config)?;
            instructions.extend(update_ix);
            let signers = vec![&admin];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&admin.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::TransferOwnership { new_admin } => {
            let mut instructions = Vec::new();
            let transfer_ix = transfer_ownership_instr(&pool_config, new_admin)?;
            instructions.extend(transfer_ix);
            let signers = vec![&admin];
            let recent_hash = rpc_client.get_latest_blockhash()?;
            let txn = Transaction::new_signed_with_payer(
                &instructions,
                Some(&admin.pubkey()),
                &signers,
                recent_hash,
            );
            let signature = send_txn(&rpc_client, &txn, true)?;
            println!("{}", signature);
        }
        PoolCommands::PoolInfo {} => {
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            println!("admin: {}", pool.admin);
            println!("minimal_stake: {}", pool.minimal_stake);
            println!("stakeholders_limit: {}", pool.stakeholders_limit);
            println!("next_stakeholders_limit: {}", pool.next_stakeholders_limit);
            println!("limit_updated: {}", pool.limit_updated);
            println!("total_clear_stake: {}", pool.total_clear_stake);
            println!("total_stakeholders: {}", pool.total_stakeholders());
            println!("reward_per_second: {}", stake_pool::rewards::REWARD_PER_SECOND);
        }
        PoolCommands::Stakeholders {} => {
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            for (rank, (wallet, value)) in pool.registry.snapshot()?.iter().enumerate() {
                println!("{}: {} {}", rank, wallet, value);
            }
        }
        PoolCommands::StakeOf { wallet } => {
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            let stakeholder = fetch_stakeholder(&rpc_client, &pool_config, &wallet)?;
            let now = chain_now(&rpc_client)?;
            println!("is_stakeholder: {}", pool.is_stakeholder(&wallet));
            println!("clear_stake: {}", stakeholder.clear_stake);
            println!("expected_reward: {}", pool.pending_reward(&stakeholder, now)?);
            println!("live_stake: {}", pool.live_stake(&stakeholder, now)?);
            println!("rewards_of: {}", pool.rewards_of(&stakeholder, now)?);
            println!("last_update_at: {}", stakeholder.last_update_at);
        }
        PoolCommands::WorstStakeholder {} => {
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            let (wallet, _) = pool.registry.worst();
            if wallet == Pubkey::default() {
                println!("{} 0", wallet);
            } else {
                let stakeholder = fetch_stakeholder(&rpc_client, &pool_config, &wallet)?;
                let now = chain_now(&rpc_client)?;
                println!("{} {}", wallet, pool.live_stake(&stakeholder, now)?);
            }
        }
        PoolCommands::NextStakeholder { wallet } => {
            let pool = fetch_pool(&rpc_client, &pool_config)?;
            let from = wallet.unwrap_or(GUARD);
            println!("{}", pool.registry.next_of(&from)?);
        }
    }
    Ok(())
}
