use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use alloy_primitives::Address;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Deploy the intent multisig with `cargo stylus deploy`, then write/update a deployments JSON.
///
/// Owners and quorum are validated locally with the same rules the constructor enforces, so a
/// bad configuration fails before any gas is spent.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Directory containing the Stylus contract crate (where `cargo stylus deploy` should be run).
    #[arg(long, default_value = "contracts/stylus/src/intent-multisig")]
    contract_dir: PathBuf,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Initial owners (comma separated addresses).
    #[arg(long, env = "MULTISIG_OWNERS", value_delimiter = ',', required = true)]
    owners: Vec<Address>,

    /// Initial quorum; must satisfy `0 < n <= owners`.
    #[arg(long, env = "MULTISIG_REQUIRED_APPROVALS")]
    required_approvals: u64,

    /// Path to write deployment info (eg, deployments.devnet.json).
    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` to store this contract.
    #[arg(long, default_value = "intent-multisig")]
    contract_key: String,

    /// Optional network name (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args to pass through to `cargo stylus deploy` (after `--`).
    ///
    /// Example:
    /// `-- --estimate-gas`
    #[arg(last = true)]
    passthrough: Vec<String>,
}

/// Constructor arguments as recorded in the deployments file.
#[derive(Serialize, Debug)]
struct MultisigConfig {
    owners: Vec<String>,
    required_approvals: u64,
}

struct Deployment {
    address: String,
    tx_hashes: Vec<String>,
    raw_output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = validate_config(&cli.owners, cli.required_approvals)?;

    println!(
        "Deploying `{}` with {} owner(s), quorum {}",
        cli.contract_key,
        config.owners.len(),
        config.required_approvals
    );
    let deployment = run_cargo_stylus_deploy(&cli, &config)?;
    write_deployments_json(&cli, &config, &deployment)?;

    println!("Deployed `{}` to {}", cli.contract_key, deployment.address);
    Ok(())
}

fn validate_config(owners: &[Address], required_approvals: u64) -> Result<MultisigConfig> {
    if owners.is_empty() {
        bail!("at least one owner is required");
    }
    let mut seen = BTreeSet::new();
    for owner in owners {
        if *owner == Address::ZERO {
            bail!("owner list contains the zero address");
        }
        if !seen.insert(*owner) {
            bail!("duplicate owner {owner}");
        }
    }
    if required_approvals == 0 || required_approvals > owners.len() as u64 {
        bail!(
            "required approvals must be between 1 and {} (got {required_approvals})",
            owners.len()
        );
    }
    Ok(MultisigConfig {
        owners: owners.iter().map(|o| o.to_checksum(None)).collect(),
        required_approvals,
    })
}

/// `cargo stylus deploy --constructor-args` values for `(address[] owners, uint256 required)`.
fn constructor_args(config: &MultisigConfig) -> [String; 2] {
    [
        format!("[{}]", config.owners.join(",")),
        config.required_approvals.to_string(),
    ]
}

fn run_cargo_stylus_deploy(cli: &Cli, config: &MultisigConfig) -> Result<Deployment> {
    // Example output lines we parse:
    //   Deploying program to address 0x...
    //   Confirmed tx 0x...
    let re_address = Regex::new(r"(?:Deploying program to address|deployed code at address:?)\s+(0x[a-fA-F0-9]{40})")?;
    let re_tx = Regex::new(r"Confirmed tx (0x[a-fA-F0-9]{64})")?;

    let mut cmd = Command::new("cargo");
    cmd.current_dir(&cli.contract_dir);
    cmd.arg("stylus").arg("deploy");
    cmd.arg("-e").arg(&cli.rpc_url);

    if let Some(ref pk_path) = cli.private_key_path {
        cmd.arg("--private-key-path").arg(pk_path);
    } else if let Some(ref pk) = cli.private_key {
        cmd.arg("--private-key").arg(pk);
    } else {
        return Err(anyhow!(
            "missing deployer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
        ));
    }

    cmd.arg("--constructor-args").args(constructor_args(config));

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    if !cli.passthrough.is_empty() {
        cmd.args(&cli.passthrough);
    }

    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let combined = format!("{stdout}\n{stderr}");

    if !output.status.success() {
        return Err(anyhow!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        ));
    }

    let address = re_address
        .captures_iter(&combined)
        .next()
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
        .ok_or_else(|| {
            anyhow!("could not parse deployed address from `cargo stylus deploy` output")
        })?;

    let tx_hashes: Vec<String> = re_tx
        .captures_iter(&combined)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(Deployment {
        address,
        tx_hashes,
        raw_output: combined,
    })
}

fn write_deployments_json(
    cli: &Cli,
    config: &MultisigConfig,
    deployment: &Deployment,
) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let existing = if cli.deployments_path.exists() {
        fs::read_to_string(&cli.deployments_path)
            .with_context(|| format!("failed reading {}", cli.deployments_path.display()))?
    } else {
        String::new()
    };

    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", cli.deployments_path.display()))?
    };
    if !root.is_object() {
        root = json!({});
    }

    root["network"] = json!(cli.network);
    root["updated_at"] = json!(now);
    if root.get("deployments").and_then(Value::as_object).is_none() {
        root["deployments"] = json!({});
    }

    let mut entry = json!({
        "address": deployment.address,
        "rpc_url": cli.rpc_url,
        "deployed_at": now,
        "constructor": config,
    });
    if !deployment.tx_hashes.is_empty() {
        entry["tx_hashes"] = json!(deployment.tx_hashes);
    }

    // Raw output is kept for debugging, truncated so the file stays reviewable.
    let trimmed = deployment.raw_output.trim();
    if !trimmed.is_empty() {
        let max = 16_000usize;
        let s = match trimmed.char_indices().nth(max) {
            Some((cut, _)) => &trimmed[..cut],
            None => trimmed,
        };
        entry["cargo_stylus_output"] = json!(s);
    }

    root["deployments"][&cli.contract_key] = entry;

    write_json_atomic(&cli.deployments_path, &root)?;
    Ok(())
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising deployments JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn config_follows_constructor_rules() {
        assert!(validate_config(&[], 1).is_err());
        assert!(validate_config(&[owner(1)], 0).is_err());
        assert!(validate_config(&[owner(1), owner(2)], 3).is_err());
        assert!(validate_config(&[owner(1), owner(1)], 1).is_err());
        assert!(validate_config(&[owner(1), Address::ZERO], 1).is_err());

        let config = validate_config(&[owner(1), owner(2), owner(3)], 2).unwrap();
        assert_eq!(config.owners.len(), 3);
        assert_eq!(config.required_approvals, 2);
    }

    #[test]
    fn constructor_args_render_as_array_and_integer() {
        let config = validate_config(&[owner(0x11), owner(0x22)], 1).unwrap();
        let [owners, required] = constructor_args(&config);
        assert!(owners.starts_with("[0x"));
        assert!(owners.ends_with(']'));
        assert_eq!(owners.matches(',').count(), 1);
        assert_eq!(required, "1");
    }

    #[test]
    fn cli_parses_owner_list() {
        let cli = Cli::try_parse_from([
            "deployer",
            "--rpc-url",
            "http://localhost:8547",
            "--private-key",
            "0x01",
            "--owners",
            "0x1111111111111111111111111111111111111111,0x2222222222222222222222222222222222222222",
            "--required-approvals",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.owners, vec![owner(0x11), owner(0x22)]);
        assert_eq!(cli.required_approvals, 2);
        assert_eq!(cli.contract_key, "intent-multisig");
    }
}
