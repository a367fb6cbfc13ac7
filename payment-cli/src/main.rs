//! Payment CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use payment_client::PaymentsClient;
use payment_types::{CreatePaymentRequest, PaymentId, PaymentType};

#[derive(Parser)]
#[command(name = "payment")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a payment
    Create {
        /// Account the funds leave (DEBIT and TRANSFER)
        #[arg(long)]
        from: Option<String>,
        /// Account the funds enter (CREDIT and TRANSFER)
        #[arg(long)]
        to: Option<String>,
        /// Positive amount, e.g. 100.00
        #[arg(long)]
        amount: Decimal,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Payment type (DEBIT, CREDIT, TRANSFER)
        #[arg(long = "type")]
        payment_type: PaymentType,
    },
    /// Get a payment by id
    Get {
        /// Payment ID (UUID)
        id: String,
    },
    /// List payments for an account
    List {
        /// Account number
        account: String,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = PaymentsClient::new(cli.api_url);

    match cli.command {
        Commands::Create {
            from,
            to,
            amount,
            description,
            payment_type,
        } => {
            let payment = client
                .create_payment(&CreatePaymentRequest {
                    from_account_no: from,
                    to_account_no: to,
                    amount,
                    description,
                    payment_type,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }
        Commands::Get { id } => {
            let id: PaymentId = id
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid payment id: {}", e))?;
            let payment = client.get_payment(id).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }
        Commands::List { account } => {
            let payments = client.payments_for_account(&account).await?;
            println!("{}", serde_json::to_string_pretty(&payments)?);
        }
        Commands::Health => {
            let healthy = client.health().await?;
            println!("{}", if healthy { "healthy" } else { "unhealthy" });
        }
    }

    Ok(())
}
