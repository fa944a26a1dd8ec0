use std::io::BufRead;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use passwords::config::Config;
use passwords::{HashPool, HashRecord};

const USAGE: &str = "usage: passwords <hash [--phc] | verify <record-file> | params>
  the password is read as a single line from stdin";

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let pool = HashPool::new(config.max_concurrency);

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["hash"] => hash(&pool, &config, false).await,
        ["hash", "--phc"] => hash(&pool, &config, true).await,
        ["verify", path] => verify(&pool, path).await,
        ["params"] => {
            println!("{}", serde_json::to_string_pretty(&config.params)?);
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprintln!("{USAGE}");
            Ok(ExitCode::from(2))
        }
    }
}

async fn hash(
    pool: &HashPool,
    config: &Config,
    phc: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let password = read_password()?;

    tracing::debug!(
        "Hashing with m={} t={} p={}",
        config.params.memory_cost,
        config.params.time_cost,
        config.params.parallelism
    );
    let record = pool
        .hash(password.as_bytes(), config.params.clone())
        .await?;

    if phc {
        println!("{}", record.to_phc_string()?);
    } else {
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(ExitCode::SUCCESS)
}

async fn verify(pool: &HashPool, path: &str) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let stored = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read record file {path}: {e}"))?;
    let stored = stored.trim();

    let record: Result<HashRecord, String> = if stored.starts_with('$') {
        HashRecord::from_phc_str(stored).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(stored).map_err(|e| format!("Invalid record JSON: {e}"))
    };
    let record = match record {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Unreadable record in {path}: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    let password = read_password()?;

    match pool.verify(password.as_bytes(), Some(record)).await {
        Ok(true) => {
            println!("match");
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => {
            println!("mismatch");
            Ok(ExitCode::from(1))
        }
        Err(e) => {
            tracing::error!("Verification could not run: {e}");
            Ok(ExitCode::from(2))
        }
    }
}

fn read_password() -> Result<Zeroizing<String>, Box<dyn std::error::Error>> {
    let mut line = Zeroizing::new(String::new());
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read password from stdin: {e}"))?;

    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
