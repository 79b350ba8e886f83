use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use paypal_gateway::application::paypal_gateway::{PayPalPaymentGateway, REDIRECT_URL_PROPERTY};
use paypal_gateway::domain::gateway::{PaymentGateway, PaymentGatewayType};
use paypal_gateway::domain::order::OrderResponseGroup;
use paypal_gateway::domain::ports::OrderStore;
use paypal_gateway::infrastructure::in_memory::{InMemoryOrderStore, InMemoryStoreService};
use paypal_gateway::infrastructure::nvp::{NvpClient, NvpClientConfig};
use paypal_gateway::interfaces::json::fixtures::Fixtures;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding the stores and orders to work on. Updated orders are
    /// written back to it.
    #[arg(long, env = "PAYPAL_GATEWAY_FIXTURES")]
    fixtures: PathBuf,

    /// Send NVP calls here instead of the processor's sandbox/live endpoint.
    #[arg(long, env = "PAYPAL_NVP_ENDPOINT")]
    nvp_endpoint: Option<String>,

    /// HTTP timeout for NVP calls, in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Code the gateway is registered under.
    #[arg(long, default_value = "PayPal")]
    gateway_code: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Opens an express-checkout session for a payment and prints the URL the
    /// buyer must visit.
    CreatePayment {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
    },
    /// Captures a session the buyer has authorized and records the approval.
    GetPayment {
        #[arg(long)]
        order_id: String,
        /// Processor token returned by `create-payment`.
        #[arg(long)]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fixtures = Fixtures::from_path(&cli.fixtures).into_diagnostic()?;
    let orders = InMemoryOrderStore::new();
    let stores = InMemoryStoreService::new();
    fixtures.seed(&orders, &stores).await;

    let mut nvp_config = NvpClientConfig {
        timeout_secs: cli.timeout_secs,
        ..NvpClientConfig::default()
    };
    if let Some(endpoint) = cli.nvp_endpoint {
        nvp_config = nvp_config.with_endpoint(endpoint);
    }
    let api = NvpClient::new(nvp_config).into_diagnostic()?;

    let gateway = PayPalPaymentGateway::new(
        cli.gateway_code,
        "PayPal express checkout",
        "https://www.paypalobjects.com/webstatic/mktg/logo/pp_cc_mark_37x23.jpg",
        PaymentGatewayType::Redirection,
        Box::new(orders.clone()),
        Box::new(stores),
        Box::new(api),
    )
    .into_diagnostic()?;

    match cli.command {
        Command::CreatePayment {
            order_id,
            payment_id,
        } => {
            let mut order = orders
                .get_by_id(&order_id, OrderResponseGroup::Full)
                .await
                .into_diagnostic()?
                .ok_or_else(|| miette!("no order with id '{order_id}'"))?;
            let position = order
                .in_payments
                .iter()
                .position(|p| p.id == payment_id)
                .ok_or_else(|| miette!("no payment '{payment_id}' in order '{order_id}'"))?;

            let mut payment = order.in_payments.remove(position);
            gateway
                .create_payment(&mut payment, &order)
                .await
                .into_diagnostic()?;

            let redirect = payment
                .property(REDIRECT_URL_PROPERTY)
                .map(|p| p.value.clone())
                .unwrap_or_default();
            let token = payment.outer_id.clone().unwrap_or_default();
            order.in_payments.insert(position, payment);
            // The gateway leaves persisting to its caller.
            orders.insert(order).await;

            println!("token: {token}");
            println!("redirect: {redirect}");
        }
        Command::GetPayment { order_id, token } => {
            let info = gateway
                .get_payment(&token, &order_id)
                .await
                .into_diagnostic()?;
            println!("approved: {}", info.is_approved());
            println!("redirect: {}", info.redirect_url());
        }
    }

    let updated = Fixtures {
        stores: fixtures.stores,
        orders: orders.all_orders().await,
    };
    updated.save(&cli.fixtures).into_diagnostic()?;

    Ok(())
}
