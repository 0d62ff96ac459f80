//! Checkout demo against a running warehouse API
//!
//! Loads the catalog, sells one unit of the first product with stock to a
//! walk-in client and prints the receipt.
//!
//! ```bash
//! ALMACEN_API_URL=http://localhost:8080 ALMACEN_TOKEN=... cargo run --bin checkout-demo
//! ```

use std::sync::Arc;

use almacen_client::{ClientConfig, RestBackend, logger};
use almacen_core::{SalesConfig, Submission, VentaWorkflow};
use anyhow::{Context, bail};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logger::init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        std::env::var("LOG_DIR").ok().as_deref(),
    );

    let client_config = ClientConfig::from_env();
    let sales_config = SalesConfig::from_env();
    tracing::info!(
        base_url = %client_config.base_url,
        moneda = %sales_config.moneda,
        tipo_cambio = sales_config.tipo_cambio,
        "Starting checkout demo"
    );

    let backend = Arc::new(RestBackend::from_config(&client_config).context("building HTTP client")?);
    let mut workflow = VentaWorkflow::new(backend.clone(), backend.clone(), backend, sales_config)?;

    if let Submission::Stale = workflow.initialize().await? {
        bail!("catalog response arrived for a discarded view");
    }

    let producto_id = workflow
        .catalog()
        .products()
        .iter()
        .find(|p| p.has_stock())
        .map(|p| p.id)
        .context("no product with stock in the catalog")?;

    for advisory in workflow.add_product(producto_id, 1)? {
        tracing::warn!("{}", advisory.message());
    }
    workflow.set_client_name("Cliente varios")?;

    let view = workflow.view();
    println!(
        "Total {} {:.2} (subtotal {:.2}, IGV {:.2})",
        view.moneda.symbol(),
        view.totals.total,
        view.totals.subtotal,
        view.totals.igv
    );

    match workflow.complete().await? {
        Submission::Applied(recibo) => println!(
            "Sale {} completed, document {}",
            recibo.id,
            recibo.numero.as_deref().unwrap_or("-")
        ),
        Submission::Stale => println!("Sale view was discarded before the server answered"),
    }

    Ok(())
}
