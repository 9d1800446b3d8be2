//! Invokes one converter and reports its attempt.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::converter::{ConversionAttempt, FormatConverter};
use crate::metrics::CONVERTER_ATTEMPTS;

/// Runs a converter in its own task and delivers exactly one attempt.
///
/// Whatever the converter does (return a payload, return an error, panic),
/// the sink receives a `ConversionAttempt`. If the sink has been abandoned,
/// the attempt is dropped without blocking.
#[derive(Clone)]
pub struct ConverterGateway {
    converter: Arc<dyn FormatConverter>,
}

impl ConverterGateway {
    pub fn new(converter: Arc<dyn FormatConverter>) -> Self {
        Self { converter }
    }

    pub fn name(&self) -> &str {
        self.converter.name()
    }

    /// Start the conversion without waiting for it.
    pub fn dispatch(
        &self,
        document: Arc<[u8]>,
        sink: mpsc::Sender<ConversionAttempt>,
    ) -> JoinHandle<()> {
        let converter = Arc::clone(&self.converter);

        tokio::spawn(async move {
            let name = converter.name().to_string();
            let outcome = AssertUnwindSafe(converter.convert(&document))
                .catch_unwind()
                .await;

            let attempt = match outcome {
                Ok(Ok(payload)) => {
                    CONVERTER_ATTEMPTS.with_label_values(&[&name, "payload"]).inc();
                    ConversionAttempt::payload(name.as_str(), payload)
                }
                Ok(Err(e)) => {
                    CONVERTER_ATTEMPTS.with_label_values(&[&name, "failure"]).inc();
                    ConversionAttempt::failure(name.as_str(), e.to_string())
                }
                Err(panic) => {
                    CONVERTER_ATTEMPTS.with_label_values(&[&name, "failure"]).inc();
                    ConversionAttempt::failure(
                        name.as_str(),
                        format!("converter {} crashed: {}", name, panic_message(&*panic)),
                    )
                }
            };

            if sink.send(attempt).await.is_err() {
                CONVERTER_ATTEMPTS.with_label_values(&[&name, "late"]).inc();
                debug!(converter = %name, "Import no longer waiting, discarding attempt");
            }
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
