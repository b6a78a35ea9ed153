//! Purchase receipts ("tickets").
//!
//! A receipt is built in two steps: [`Receipt::build`] lays out the text
//! lines for one order, and [`pdf::render`] turns that layout into PDF bytes.
//! Keeping the layout separate lets the content be tested without parsing
//! PDF output.

pub mod pdf;

use geek_store_core::format_money;

use crate::models::{CurrentUser, Order, OrderLine};

/// Errors producing a receipt document.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

/// Visual role of a receipt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Body,
    Heading,
    Total,
}

impl LineStyle {
    /// Font size in points.
    #[must_use]
    pub const fn font_size(self) -> f32 {
        match self {
            Self::Title => 20.0,
            Self::Total => 16.0,
            Self::Body | Self::Heading => 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One line of text on the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub text: String,
    pub style: LineStyle,
    pub align: Align,
    /// Extra blank space above the line, in multiples of its line height.
    pub space_before: f32,
}

impl ReceiptLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
            align: Align::Left,
            space_before: 0.0,
        }
    }

    const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    const fn spaced(mut self, lines: f32) -> Self {
        self.space_before = lines;
        self
    }
}

/// Fixed-layout receipt for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Document title (PDF metadata).
    pub title: String,
    pub lines: Vec<ReceiptLine>,
}

impl Receipt {
    /// Lay out the receipt for `order`, printed for `customer`.
    #[must_use]
    pub fn build(
        store_name: &str,
        customer: &CurrentUser,
        order: &Order,
        lines: &[OrderLine],
    ) -> Self {
        let mut out = vec![
            ReceiptLine::new(store_name, LineStyle::Title).aligned(Align::Center),
            ReceiptLine::new(
                format!("Ticket de compra • Orden #{}", order.id),
                LineStyle::Body,
            )
            .spaced(1.0),
            ReceiptLine::new(format!("Cliente: {}", customer.name), LineStyle::Body),
            ReceiptLine::new(format!("Correo: {}", customer.email), LineStyle::Body),
            ReceiptLine::new(
                format!("Fecha: {}", order.created_at.format("%d/%m/%Y %H:%M UTC")),
                LineStyle::Body,
            ),
            ReceiptLine::new("Productos:", LineStyle::Heading).spaced(1.0),
        ];

        for (i, line) in lines.iter().enumerate() {
            let entry = ReceiptLine::new(
                format!(
                    "{}  | Cant: {}  | {} c/u  | Subtotal: {}",
                    line.product_name,
                    line.quantity,
                    format_money(line.unit_price),
                    format_money(line.subtotal)
                ),
                LineStyle::Body,
            );
            out.push(if i == 0 { entry.spaced(0.5) } else { entry });
        }

        out.push(
            ReceiptLine::new(
                format!("Total: {}", format_money(order.total)),
                LineStyle::Total,
            )
            .aligned(Align::Right)
            .spaced(1.0),
        );

        Self {
            title: format!("{store_name} - Orden #{}", order.id),
            lines: out,
        }
    }

    /// File name used in the `Content-Disposition` header.
    #[must_use]
    pub fn file_name(order: &Order) -> String {
        format!("ticket_{}.pdf", order.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use geek_store_core::{Email, OrderId, ProductId, UserId};

    use super::*;

    pub(crate) fn sample() -> (CurrentUser, Order, Vec<OrderLine>) {
        let customer = CurrentUser {
            id: UserId::new(3),
            name: "Ana".to_string(),
            email: Email::parse("ana@example.com").unwrap(),
        };
        let order = Order {
            id: OrderId::new(42),
            user_id: UserId::new(3),
            total: Decimal::from(25),
            created_at: Utc.with_ymd_and_hms(2026, 3, 9, 18, 5, 0).unwrap(),
        };
        let lines = vec![
            OrderLine {
                order_id: OrderId::new(42),
                product_id: ProductId::new(1),
                product_name: "DualSense".to_string(),
                quantity: 2,
                unit_price: Decimal::from(10),
                subtotal: Decimal::from(20),
            },
            OrderLine {
                order_id: OrderId::new(42),
                product_id: ProductId::new(2),
                product_name: "Funda".to_string(),
                quantity: 1,
                unit_price: Decimal::from(5),
                subtotal: Decimal::from(5),
            },
        ];
        (customer, order, lines)
    }

    #[test]
    fn test_layout_content() {
        let (customer, order, lines) = sample();
        let receipt = Receipt::build("PlayStation Geek Store", &customer, &order, &lines);
        let texts: Vec<&str> = receipt.lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(
            texts,
            vec![
                "PlayStation Geek Store",
                "Ticket de compra • Orden #42",
                "Cliente: Ana",
                "Correo: ana@example.com",
                "Fecha: 09/03/2026 18:05 UTC",
                "Productos:",
                "DualSense  | Cant: 2  | $10.00 c/u  | Subtotal: $20.00",
                "Funda  | Cant: 1  | $5.00 c/u  | Subtotal: $5.00",
                "Total: $25.00",
            ]
        );
    }

    #[test]
    fn test_layout_styles() {
        let (customer, order, lines) = sample();
        let receipt = Receipt::build("Store", &customer, &order, &lines);

        let first = &receipt.lines[0];
        assert_eq!(first.style, LineStyle::Title);
        assert_eq!(first.align, Align::Center);

        let last = receipt.lines.last().unwrap();
        assert_eq!(last.style, LineStyle::Total);
        assert_eq!(last.align, Align::Right);
    }

    #[test]
    fn test_layout_without_lines_still_has_total() {
        let (customer, order, _) = sample();
        let receipt = Receipt::build("Store", &customer, &order, &[]);

        assert_eq!(receipt.lines.len(), 7);
        assert_eq!(receipt.lines.last().unwrap().text, "Total: $25.00");
    }

    #[test]
    fn test_file_name() {
        let (_, order, _) = sample();
        assert_eq!(Receipt::file_name(&order), "ticket_42.pdf");
    }
}
