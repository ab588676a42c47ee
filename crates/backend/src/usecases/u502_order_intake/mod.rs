pub mod executor;
pub mod mail_body;
pub mod mailer;
pub mod order_number;

pub use executor::OrderService;
pub use mailer::{build_mailer, DisabledMailer, MailError, OrderMailer, SmtpMailer};
