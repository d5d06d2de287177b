//! Devnet smoke run against a deployed multisig.
//!
//! Reads `RPC_URL`, `PRIV_KEY_PATH` and `STYLUS_CONTRACT_ADDRESS` (a `.env` file is honoured).
//! The signer must be one of the owners. Creates a zero-value transfer intent to `RECIPIENT`
//! (defaults to the signer) and prints the resulting intent state.

use std::{
    io::{BufRead, BufReader},
    str::FromStr,
    sync::Arc,
};

use dotenv::dotenv;
use ethers::{
    middleware::SignerMiddleware,
    prelude::abigen,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes, U256},
};
use eyre::eyre;

abigen!(
    IntentMultisig,
    r#"[
        function createIntent(address target, uint256 value, bytes payload) external returns (uint256)
        function approveIntent(uint256 intentId) external
        function executeIntent(uint256 intentId) external returns (bool, bytes)
        function isOwner(address identity) external view returns (bool)
        function ownerCount() external view returns (uint256)
        function requiredApprovals() external view returns (uint256)
        function intentCount() external view returns (uint256)
        function getIntent(uint256 intentId) external view returns (address, uint256, bytes, uint256, bool)
        function isConfirmed(uint256 intentId) external view returns (bool)
    ]"#
);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let priv_key_path =
        std::env::var("PRIV_KEY_PATH").map_err(|_| eyre!("No PRIV_KEY_PATH env var set"))?;
    let rpc_url = std::env::var("RPC_URL").map_err(|_| eyre!("No RPC_URL env var set"))?;
    let contract_address = std::env::var("STYLUS_CONTRACT_ADDRESS")
        .map_err(|_| eyre!("No STYLUS_CONTRACT_ADDRESS env var set"))?;

    let provider = Provider::<Http>::try_from(rpc_url)?;
    let address: Address = contract_address.parse()?;

    let privkey = read_secret_from_file(&priv_key_path)?;
    let wallet = LocalWallet::from_str(&privkey)?;
    let chain_id = provider.get_chainid().await?.as_u64();
    let signer = wallet.with_chain_id(chain_id);
    let me = signer.address();
    let client = Arc::new(SignerMiddleware::new(provider, signer));

    let multisig = IntentMultisig::new(address, client);

    let owners = multisig.owner_count().call().await?;
    let required = multisig.required_approvals().call().await?;
    println!("owners = {owners}, required approvals = {required}");

    if !multisig.is_owner(me).call().await? {
        return Err(eyre!("{me:?} is not an owner of {address:?}"));
    }

    let recipient = match std::env::var("RECIPIENT") {
        Ok(raw) => raw.parse::<Address>()?,
        Err(_) => me,
    };

    let receipt = multisig
        .create_intent(recipient, U256::zero(), Bytes::new())
        .send()
        .await?
        .await?
        .ok_or_else(|| eyre!("createIntent was dropped from the mempool"))?;
    println!("createIntent tx = {:?}", receipt.transaction_hash);

    let intent_id = multisig.intent_count().call().await?;
    let (target, value, _payload, approvals, executed) =
        multisig.get_intent(intent_id).call().await?;
    println!(
        "intent {intent_id}: target = {target:?}, value = {value}, approvals = {approvals}, executed = {executed}"
    );
    if !executed {
        let confirmed = multisig.is_confirmed(intent_id).call().await?;
        println!("awaiting approvals (confirmed = {confirmed})");
    }
    Ok(())
}

fn read_secret_from_file(fpath: &str) -> eyre::Result<String> {
    let f = std::fs::File::open(fpath)?;
    let mut buf_reader = BufReader::new(f);
    let mut secret = String::new();
    buf_reader.read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}
