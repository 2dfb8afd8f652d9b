use crate::models::{Customer, Order, Product};

use super::OutgoingEmail;

// ============================================================================
// Email Templates
// ============================================================================
//
// Rendered server-side, one template per outcome. HTML plus a plain-text
// alternative for clients that want neither style nor joy.
//
// ============================================================================

/// Success template: sent when the simulated payment was approved.
pub fn confirmation_email(order: &Order, customer: &Customer, product: &Product) -> OutgoingEmail {
    let total = product.price * f64::from(order.quantity);

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
        .container {{ max-width: 600px; margin: 0 auto; }}
        .header {{ background-color: #4CAF50; color: white; padding: 20px; text-align: center; }}
        .content {{ padding: 20px; border: 1px solid #ddd; }}
        .order-details {{ background-color: #f9f9f9; padding: 15px; margin: 15px 0; }}
        .footer {{ text-align: center; padding: 20px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>✅ Order Confirmed!</h1>
        </div>
        <div class="content">
            <h2>Thank you for your purchase, {full_name}!</h2>
            <p>Your order has been successfully processed and confirmed.</p>

            <div class="order-details">
                <h3>Order Details:</h3>
                <p><strong>Order Number:</strong> {order_number}</p>
                <p><strong>Product:</strong> {title}</p>
                <p><strong>Variant:</strong> {variant}</p>
                <p><strong>Quantity:</strong> {quantity}</p>
                <p><strong>Unit Price:</strong> ${price:.2}</p>
                <p><strong>Total Amount:</strong> ${total:.2}</p>
            </div>

            <div class="order-details">
                <h3>Shipping Address:</h3>
                <p>{address}<br>
                {city}, {state} {zip_code}</p>
            </div>

            <p>We'll send you another email with tracking information once your order ships.</p>
            <p>If you have any questions, please contact our support team.</p>
        </div>
        <div class="footer">
            <p>Thank you for shopping with us!</p>
        </div>
    </div>
</body>
</html>"#,
        full_name = customer.full_name,
        order_number = order.order_number,
        title = product.title,
        variant = order.variant,
        quantity = order.quantity,
        price = product.price,
        total = total,
        address = customer.address,
        city = customer.city,
        state = customer.state,
        zip_code = customer.zip_code,
    );

    let text_body = format!(
        "Your order {} has been confirmed! Product: {}, Variant: {}, Quantity: {}, Total: ${:.2}",
        order.order_number, product.title, order.variant, order.quantity, total
    );

    OutgoingEmail {
        to: customer.email.clone(),
        subject: format!("✅ Order Confirmed: {}", order.order_number),
        html_body,
        text_body,
    }
}

/// Failure template: sent for declined and errored payment simulations.
pub fn payment_failed_email(order: &Order, customer: &Customer, product: &Product) -> OutgoingEmail {
    let total = product.price * f64::from(order.quantity);

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
        .container {{ max-width: 600px; margin: 0 auto; }}
        .header {{ background-color: #f44336; color: white; padding: 20px; text-align: center; }}
        .content {{ padding: 20px; border: 1px solid #ddd; }}
        .order-details {{ background-color: #f9f9f9; padding: 15px; margin: 15px 0; }}
        .footer {{ text-align: center; padding: 20px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>❌ Order Payment Failed</h1>
        </div>
        <div class="content">
            <h2>Hello {full_name},</h2>
            <p>Unfortunately, we were unable to process your payment for order {order_number}.</p>

            <div class="order-details">
                <h3>Order Details:</h3>
                <p><strong>Order Number:</strong> {order_number}</p>
                <p><strong>Product:</strong> {title}</p>
                <p><strong>Variant:</strong> {variant}</p>
                <p><strong>Quantity:</strong> {quantity}</p>
                <p><strong>Total Amount:</strong> ${total:.2}</p>
            </div>

            <p><strong>What to do next:</strong></p>
            <ul>
                <li>Check that your payment information is correct</li>
                <li>Ensure you have sufficient funds available</li>
                <li>Contact your bank if the issue persists</li>
                <li>Try placing the order again</li>
            </ul>

            <p>If you continue to experience issues, please contact our support team.</p>
        </div>
        <div class="footer">
            <p>We apologize for any inconvenience.</p>
        </div>
    </div>
</body>
</html>"#,
        full_name = customer.full_name,
        order_number = order.order_number,
        title = product.title,
        variant = order.variant,
        quantity = order.quantity,
        total = total,
    );

    let text_body = format!(
        "Your order {} payment failed. Please try again or contact support. Product: {}, Total: ${:.2}",
        order.order_number, product.title, total
    );

    OutgoingEmail {
        to: customer.email.clone(),
        subject: format!("❌ Order Payment Failed: {}", order.order_number),
        html_body,
        text_body,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
