//! Receipt

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLedger, CartLine},
    checkout::CheckoutSummary,
    pricing::{format_rubles, format_weight},
    products::UnitKind,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Write the cart lines and checkout totals as a table.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if writing to `out` fails.
pub fn write_to(
    mut out: impl io::Write,
    cart: &CartLedger,
    summary: &CheckoutSummary,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Товар", "Единица", "Кол-во", "Цена", "Сумма"]);

    for line in cart.lines() {
        builder.push_record([
            line.product().name.clone(),
            unit_description(line),
            line.quantity().to_string(),
            format_rubles(&line.unit_price()),
            format_rubles(&line.total()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    write_summary(&mut out, summary)?;

    Ok(())
}

fn unit_description(line: &CartLine) -> String {
    match (line.unit(), line.grams()) {
        (UnitKind::Gram, Some(grams)) => format_weight(grams),
        (unit, _) => unit.label().to_string(),
    }
}

fn write_summary(out: &mut impl io::Write, summary: &CheckoutSummary) -> Result<(), ReceiptError> {
    let delivery = if summary.is_free_delivery {
        "Бесплатно".to_string()
    } else {
        format_rubles(&summary.delivery_price)
    };

    write_summary_line(out, "Товары:", &format_rubles(&summary.items_total))?;
    write_summary_line(out, "Доставка:", &delivery)?;

    if summary.urgency_cost > Decimal::ZERO {
        write_summary_line(out, "Срочность:", &format_rubles(&summary.urgency_cost))?;
    }

    write_summary_line(out, "Итого:", &format_rubles(&summary.grand_total))?;

    if summary.below_minimum {
        writeln!(
            out,
            " Минимальная сумма заказа: {}",
            format_rubles(&summary.minimum_order)
        )?;
    }

    Ok(())
}

fn write_summary_line(out: &mut impl io::Write, label: &str, value: &str) -> Result<(), ReceiptError> {
    writeln!(out, " {label:<12}{value:>12}")?;

    Ok(())
}
