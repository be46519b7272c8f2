use clap::{Parser, Subcommand};
use tracing::{info, Instrument};

use cart_actor::{setup_tracing, CartConfig, CartSystem, ProductId, UpdateProductAmount};

#[derive(Parser)]
#[command(name = "cart")]
#[command(version, about = "Inspect and change the persisted shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product's line
    Remove { product_id: ProductId },
    /// Set the quantity held for a product already in the cart
    Set {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    let system = CartSystem::from_config(&config).map_err(|e| e.to_string())?;
    let cart = system.cart_client.clone();

    let span = tracing::info_span!("cart_command");
    let handle = cart.clone();
    async move {
        match cli.command {
            Command::Show => {}
            Command::Add { product_id } => handle.add_product(product_id).await,
            Command::Remove { product_id } => handle.remove_product(product_id).await,
            Command::Set { product_id, amount } => {
                handle
                    .update_product_amount(UpdateProductAmount { product_id, amount })
                    .await;
            }
        }
    }
    .instrument(span)
    .await;

    let snapshot = cart.get_cart().await.map_err(|e| e.to_string())?;
    info!(items = snapshot.len(), "Cart contents");
    for product in snapshot.items() {
        info!(product_id = product.id, title = %product.title, amount = product.amount, "Cart line");
    }

    drop(cart);
    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
