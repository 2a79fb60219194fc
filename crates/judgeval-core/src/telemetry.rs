//! Entry point for OpenAI call instrumentation.
//!
//! Span creation and export belong to the OpenTelemetry instrumentation
//! library the application already uses. This module forwards to it so
//! callers can reach it through the SDK.

/// An OpenAI instrumentation library, as seen from the SDK.
pub trait OpenAiInstrumentation {
    /// Handle to the configured OpenTelemetry SDK.
    type Handle;
    type Builder;
    type Telemetry;

    fn builder(handle: Self::Handle) -> Self::Builder;

    fn create(handle: Self::Handle) -> Self::Telemetry;
}

pub struct OpenAiTelemetry;

impl OpenAiTelemetry {
    pub fn builder<I: OpenAiInstrumentation>(handle: I::Handle) -> I::Builder {
        I::builder(handle)
    }

    pub fn create<I: OpenAiInstrumentation>(handle: I::Handle) -> I::Telemetry {
        I::create(handle)
    }
}
