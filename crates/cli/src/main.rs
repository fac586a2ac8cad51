//! Nurvi Jewel CLI - operational helpers.
//!
//! # Usage
//!
//! ```bash
//! # Hash the admin password for ADMIN_PASSWORD_HASH
//! nurvi-cli admin hash-password --password 'correct horse battery'
//!
//! # Show shipping, GST and total for a cart subtotal
//! nurvi-cli checkout summary --subtotal 24999
//! nurvi-cli checkout summary --subtotal 24999 --promo WELCOME10
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nurvi-cli")]
#[command(author, version, about = "Nurvi Jewel CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin account helpers
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Checkout helpers
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Print an Argon2 hash for `ADMIN_PASSWORD_HASH`
    HashPassword {
        /// Password to hash
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Print the order summary for a subtotal
    Summary {
        /// Cart subtotal in rupees (decimals allowed)
        #[arg(short, long)]
        subtotal: String,
        /// Promo code to apply (WELCOME10 or SAVE500)
        #[arg(long)]
        promo: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => commands::admin::hash_password(&password)?,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary { subtotal, promo } => {
                commands::checkout::summary(&subtotal, promo.as_deref())?;
            }
        },
    }
    Ok(())
}
