//! Request/response shim over an external wallet provider.
//!
//! Wallet implementations expose signing through one of two calling
//! conventions: a direct request entry point (method name plus ordered
//! parameter list) or a legacy dispatcher that exchanges whole JSON-RPC
//! envelopes. [`invoke`] probes which surface a [`WalletProvider`]
//! offers and fails fast when there is none - an absent signer must
//! never look like a successful no-op.

use crate::{ConditionalSync, ProviderError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A JSON-RPC 2.0 request envelope, as consumed by legacy dispatcher
/// providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol tag, always `"2.0"`.
    pub jsonrpc: String,

    /// Request correlation id. Monotonic per process.
    pub id: u64,

    /// RPC method name.
    pub method: String,

    /// Ordered parameter list.
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Wrap a method call in a fresh envelope.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Successful result, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error reported by the provider, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorPayload>,
}

/// Error member of a JSON-RPC response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    /// Numeric error code.
    pub code: i64,

    /// Human-readable description.
    pub message: String,
}

/// Direct dispatch surface: one call per method, raw result out.
///
/// This is the calling convention of providers exposing a
/// `request`-style entry point.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait RequestSurface: ConditionalSync {
    /// Perform one call, returning the raw result value.
    ///
    /// A rejection by the user is a failure of this call and must be
    /// reported as a [`ProviderError`], never swallowed.
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError>;
}

/// Legacy dispatch surface: whole JSON-RPC envelopes in and out.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait SendSurface: ConditionalSync {
    /// Dispatch one envelope and return the provider's envelope.
    async fn send(&self, request: RpcRequest) -> Result<RpcResponse, ProviderError>;
}

/// An external wallet provider, advertising whichever invocation
/// surfaces it supports.
///
/// Implementations return `Some` from at least one accessor. A provider
/// that returns `None` from both fails every call with
/// [`ProviderError::Unsupported`].
pub trait WalletProvider: ConditionalSync {
    /// The direct request surface, when supported.
    fn request_surface(&self) -> Option<&dyn RequestSurface> {
        None
    }

    /// The legacy envelope surface, when supported.
    fn send_surface(&self) -> Option<&dyn SendSurface> {
        None
    }
}

impl<P> WalletProvider for &P
where
    P: WalletProvider + ?Sized,
{
    fn request_surface(&self) -> Option<&dyn RequestSurface> {
        (**self).request_surface()
    }

    fn send_surface(&self) -> Option<&dyn SendSurface> {
        (**self).send_surface()
    }
}

impl<P> WalletProvider for Arc<P>
where
    P: WalletProvider + ?Sized,
{
    fn request_surface(&self) -> Option<&dyn RequestSurface> {
        (**self).request_surface()
    }

    fn send_surface(&self) -> Option<&dyn SendSurface> {
        (**self).send_surface()
    }
}

/// Invoke `method` on whichever calling convention `provider` exposes.
///
/// The request surface is preferred; the envelope surface is the
/// fallback. An envelope carrying an `error` member, or carrying
/// neither `result` nor `error`, fails the call. Failures are never
/// retried: a provider-level rejection is not speculative.
pub async fn invoke<P>(
    provider: &P,
    method: &str,
    params: Vec<Value>,
) -> Result<Value, ProviderError>
where
    P: WalletProvider + ?Sized,
{
    if let Some(surface) = provider.request_surface() {
        return surface.request(method, params).await;
    }

    if let Some(surface) = provider.send_surface() {
        let response = surface.send(RpcRequest::new(method, params)).await?;
        if let Some(error) = response.error {
            return Err(ProviderError::call(
                method,
                format!("{} (code {})", error.message, error.code),
            ));
        }
        return response.result.ok_or_else(|| {
            ProviderError::call(method, "response carried neither result nor error")
        });
    }

    Err(ProviderError::Unsupported)
}
