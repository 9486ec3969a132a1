use gryadka::pricing::format_rubles;
use gryadka_client::api::StorefrontApi;

pub(crate) async fn list(api: &impl StorefrontApi) -> Result<(), String> {
    let orders = api
        .orders()
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }

    for order in orders {
        println!(
            "#{}  {}  {}  {}",
            order.id,
            order.created_at,
            order.status,
            format_rubles(&order.total)
        );

        for line in &order.items {
            println!(
                "    {} x {} ({})  {}",
                line.product_name,
                line.quantity.normalize(),
                line.price_type.label(),
                format_rubles(&line.subtotal)
            );
        }
    }

    Ok(())
}
