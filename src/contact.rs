//! Contact form stub and WhatsApp links.
//!
//! The site has no contact backend. Submitting the form waits a fixed delay,
//! shows a confirmation, clears the fields, and goes back to idle after a
//! second delay:
//!
//! ```text
//! Idle ──submit──► Submitting ──delay──► Submitted ──confirmation──► Idle
//!                      │
//!                      └──transport error──► Idle (fields kept)
//! ```
//!
//! Delivery goes through the [`ContactTransport`] trait. The only
//! implementation, [`SimulatedTransport`], sleeps and discards the message.
//! `contact.js` runs the same state machine in the browser with the same
//! delays, read from the form's `data-*` attributes.

use crate::config::ContactFormConfig;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContactError {
    #[error("missing required fields: {}", field_list(.0))]
    MissingFields(Vec<Field>),
    #[error("transport failed: {0}")]
    Transport(String),
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Message,
}

impl Field {
    /// Display order on the form.
    pub const ALL: [Field; 4] = [Field::Name, Field::Phone, Field::Email, Field::Message];

    /// The input's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Phone => "Your phone number",
            Field::Email => "your@email.com",
            Field::Message => "Tell us about your inquiry...",
        }
    }

    /// Phone is the only optional field.
    pub fn required(self) -> bool {
        !matches!(self, Field::Phone)
    }

    /// HTML input type. `None` renders a textarea.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            Field::Name => Some("text"),
            Field::Phone => Some("tel"),
            Field::Email => Some("email"),
            Field::Message => None,
        }
    }
}

/// The four captured values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

impl FormStatus {
    /// Value of the form's `data-status` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Idle => "idle",
            FormStatus::Submitting => "submitting",
            FormStatus::Submitted => "submitted",
        }
    }
}

/// Delivers a contact message somewhere.
pub trait ContactTransport {
    fn send(&self, message: &ContactMessage) -> impl Future<Output = Result<(), ContactError>> + Send;
}

/// Waits a fixed delay and reports success. Nothing is sent.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &ContactFormConfig) -> Self {
        Self::new(Duration::from_millis(config.submit_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::from_config(&ContactFormConfig::default())
    }
}

impl ContactTransport for SimulatedTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            name = %message.name,
            email = %message.email,
            "contact message accepted (simulated, not delivered)"
        );
        Ok(())
    }
}

/// Form fields plus submission status.
///
/// Status changes are published on a watch channel; see [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct ContactForm {
    message: ContactMessage,
    status: watch::Sender<FormStatus>,
    confirmation: Duration,
}

impl ContactForm {
    pub fn new(confirmation: Duration) -> Self {
        let (status, _) = watch::channel(FormStatus::Idle);
        Self {
            message: ContactMessage::default(),
            status,
            confirmation,
        }
    }

    pub fn from_config(config: &ContactFormConfig) -> Self {
        Self::new(Duration::from_millis(config.confirmation_ms))
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.message.slot(field) = value.into();
    }

    pub fn field(&self, field: Field) -> &str {
        self.message.get(field)
    }

    pub fn fields(&self) -> &ContactMessage {
        &self.message
    }

    pub fn status(&self) -> FormStatus {
        *self.status.borrow()
    }

    pub fn is_submitting(&self) -> bool {
        self.status() == FormStatus::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.status() == FormStatus::Submitted
    }

    /// Watch status transitions.
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    /// Required fields that are blank (whitespace counts as blank).
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.required() && self.message.get(*f).trim().is_empty())
            .collect()
    }

    fn set_status(&self, status: FormStatus) {
        self.status.send_replace(status);
    }

    /// Submit through `transport`. On success the fields are cleared and the
    /// sent message is returned; the form stays `Submitted` until
    /// [`settle`](Self::settle).
    pub async fn submit<T: ContactTransport>(
        &mut self,
        transport: &T,
    ) -> Result<ContactMessage, ContactError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        self.set_status(FormStatus::Submitting);
        if let Err(e) = transport.send(&self.message).await {
            tracing::warn!(error = %e, "contact submission failed");
            self.set_status(FormStatus::Idle);
            return Err(e);
        }

        let sent = std::mem::take(&mut self.message);
        self.set_status(FormStatus::Submitted);
        Ok(sent)
    }

    /// Hold the confirmation for its delay, then return to idle.
    /// Does nothing unless the form is showing a confirmation.
    pub async fn settle(&mut self) {
        if !self.is_submitted() {
            return;
        }
        tokio::time::sleep(self.confirmation).await;
        self.set_status(FormStatus::Idle);
    }
}

/// `wa.me` chat link, with a pre-filled message when one is given.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    if message.is_empty() {
        format!("https://wa.me/{number}")
    } else {
        format!("https://wa.me/{number}?text={}", encode_component(message))
    }
}

/// Percent-encode like the browser's `encodeURIComponent`, which also leaves
/// `! * ' ( )` literal.
fn encode_component(text: &str) -> String {
    const KEPT: [(&str, &str); 5] = [
        ("%21", "!"),
        ("%2A", "*"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
    ];
    KEPT.iter()
        .fold(urlencoding::encode(text).into_owned(), |encoded, (escape, literal)| {
            encoded.replace(escape, literal)
        })
}
