// main.rs
// Operator CLI around the TOTP core. Loads .env, then TOTP_* settings.
//
// Commands:
// - enroll --account ...       -> new Base32 secret + otpauth URL (optionally a PNG QR)
// - code --secret ...          -> current code and seconds left in the step
// - verify --secret --code ... -> checks a code within the drift window
// - inspect <uri>              -> non-secret fields of an otpauth URL

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use epatrol_totp::{
    ProvisioningUri, Secret, SecretManager, Settings, Verification, clock, totp, verify,
};

#[derive(Parser)]
#[command(name = "epatrol-totp", version, about = "Two-factor TOTP enrollment and verification")]
struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a secret and provisioning URL for an account
    Enroll {
        #[arg(long)]
        account: String,
        /// Defaults to TOTP_ISSUER
        #[arg(long)]
        issuer: Option<String>,
        /// Write the QR code as PNG to this file
        #[arg(long)]
        qr: Option<PathBuf>,
        /// Draw the QR code in the terminal
        #[arg(long)]
        show_qr: bool,
    },
    /// Print the code for a secret
    Code {
        #[arg(long, env = "TOTP_SECRET", hide_env_values = true)]
        secret: String,
        /// Unix time to use instead of the system clock
        #[arg(long)]
        at: Option<u64>,
    },
    /// Check a submitted code
    Verify {
        #[arg(long, env = "TOTP_SECRET", hide_env_values = true)]
        secret: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        at: Option<u64>,
        /// Defaults to TOTP_WINDOW
        #[arg(long)]
        window: Option<u32>,
    },
    /// Show the non-secret fields of an otpauth:// URL
    Inspect { uri: String },
}

fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::from_env().context("failed to load TOTP settings")?;

    match cli.command {
        Commands::Enroll {
            account,
            issuer,
            qr,
            show_qr,
        } => {
            let issuer = issuer.unwrap_or_else(|| settings.params.issuer.clone());
            let mut manager = SecretManager::new(settings.secret_bytes)?;
            let enrollment = manager
                .generate(&account, &issuer, &settings.params)
                .context("enrollment failed")?;

            if let Some(path) = &qr {
                let png = enrollment.qr_png(200)?;
                fs::write(path, png)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "qr code written");
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&enrollment)?);
            } else {
                println!("secret:  {}", enrollment.secret);
                println!("otpauth: {}", enrollment.provisioning_uri);
            }
            if show_qr {
                println!("{}", enrollment.qr_terminal()?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Code { secret, at } => {
            let secret = Secret::from_base32(&secret)?;
            let now = at.unwrap_or_else(clock::now_unix);
            let code = totp::generate(secret.as_bytes(), now, &settings.params)?;
            let remaining = clock::seconds_remaining(now, settings.params.period)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "code": code, "remaining_seconds": remaining })
                );
            } else {
                println!("{code} ({remaining}s left)");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify {
            secret,
            code,
            at,
            window,
        } => {
            let secret = Secret::from_base32(&secret)?;
            let now = at.unwrap_or_else(clock::now_unix);
            let window = window.unwrap_or(settings.window);
            let outcome = verify::verify_detailed(
                secret.as_bytes(),
                &code,
                now,
                &settings.params,
                window,
            )?;
            let ok = outcome.is_accepted();
            if cli.json {
                let body = match outcome {
                    Verification::Accepted { counter, offset } => {
                        serde_json::json!({ "ok": true, "counter": counter, "offset": offset })
                    }
                    Verification::Rejected => serde_json::json!({ "ok": false }),
                };
                println!("{body}");
            } else {
                println!("{}", if ok { "ok" } else { "rejected" });
            }
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }
        Commands::Inspect { uri } => {
            let parsed = ProvisioningUri::parse(&uri)?;
            let p = &parsed.params;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "issuer": p.issuer,
                        "account": p.account,
                        "algorithm": p.algorithm,
                        "digits": p.digits,
                        "period": p.period,
                        "secret_bytes": parsed.secret.len(),
                    })
                );
            } else {
                println!("issuer:    {}", p.issuer);
                println!("account:   {}", p.account);
                println!("algorithm: {}", p.algorithm);
                println!("digits:    {}", p.digits);
                println!("period:    {}s", p.period);
                println!("secret:    {} bytes", parsed.secret.len());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
