use chrono::Local;
use contracts::domain::a002_order::{OrderRequest, OrderResponse};
use std::sync::Arc;

use super::mail_body::compose;
use super::mailer::OrderMailer;
use super::order_number::generate_order_number;
use crate::shared::config::OrderConfig;

/// Accepts storefront orders and notifies the shop by email
pub struct OrderService {
    config: OrderConfig,
    mailer: Arc<dyn OrderMailer>,
}

impl OrderService {
    pub fn new(config: OrderConfig, mailer: Arc<dyn OrderMailer>) -> Self {
        Self { config, mailer }
    }

    /// Always accepts the order. Mail delivery problems are logged only.
    pub async fn submit(&self, order: OrderRequest) -> OrderResponse {
        let placed_at = Local::now();
        let order_number = generate_order_number(&self.config.number_prefix, &placed_at);

        tracing::info!(
            "Order {} received: customer='{}', items={}, total={}",
            order_number,
            order.customer.name,
            order.products.len(),
            order.total
        );

        let email = compose(&order_number, &self.config.shop_name, &placed_at, &order);
        if let Err(e) = self.mailer.send(&email).await {
            tracing::warn!("Failed to send email for order {}: {}", order_number, e);
        }

        OrderResponse::accepted(order_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::EmailConfig;
    use crate::usecases::u502_order_intake::mail_body::OrderEmail;
    use crate::usecases::u502_order_intake::mailer::{MailError, SmtpMailer};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OrderEmail>>,
    }

    #[async_trait]
    impl OrderMailer for RecordingMailer {
        async fn send(&self, email: &OrderEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn is_order_number(value: &str, prefix: &str) -> bool {
        let parts: Vec<&str> = value.split('-').collect();
        parts.len() == 3
            && parts[0] == prefix
            && parts[1].len() == 8
            && parts[2].len() == 5
            && parts[1..].iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
    }

    #[tokio::test]
    async fn test_submit_sends_email_with_order_number() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = OrderService::new(OrderConfig::default(), mailer.clone());

        let response = service.submit(OrderRequest::default()).await;

        assert!(response.ok);
        assert!(is_order_number(&response.order_number, "THO"));
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains(&response.order_number));
        assert!(sent[0].subject.ends_with("Thottam Organics"));
    }

    #[tokio::test]
    async fn test_submit_succeeds_when_smtp_is_unreachable() {
        let email_config = EmailConfig {
            smtp_server: "127.0.0.1".to_string(),
            smtp_port: 1,
            address: Some("shop@example.com".to_string()),
            password: Some("wrong".to_string()),
            timeout_secs: 2,
        };
        let mailer = SmtpMailer::new(&email_config, "shop@example.com", "wrong").unwrap();
        let config = OrderConfig {
            number_prefix: "ORD".to_string(),
            ..OrderConfig::default()
        };
        let service = OrderService::new(config, Arc::new(mailer));

        let response = service.submit(OrderRequest::default()).await;

        assert!(response.ok);
        assert!(is_order_number(&response.order_number, "ORD"));
    }
}
