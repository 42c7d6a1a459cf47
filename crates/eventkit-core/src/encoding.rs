//! Outbound encoding selection.
//!
//! A [`ContextDecorator`] adjusts the [`OutboundContext`] an event is sent
//! with. Decorators are folded in registration order, so the last one that
//! touches a field decides its value.

use std::sync::Arc;

/// How an outgoing event is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Let the transport choose.
    #[default]
    Unspecified,
    /// Attributes in transport headers, data as the message body.
    Binary,
    /// The whole event serialized into the message body.
    Structured,
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::Binary => write!(f, "binary"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Per-send settings produced by folding the client's decorator chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutboundContext {
    pub encoding: EncodingMode,
}

type DecorateFn = dyn Fn(OutboundContext) -> OutboundContext + Send + Sync;

/// A named function over [`OutboundContext`].
#[derive(Clone)]
pub struct ContextDecorator {
    name: &'static str,
    decorate: Arc<DecorateFn>,
}

impl ContextDecorator {
    pub fn new<F>(name: &'static str, decorate: F) -> Self
    where
        F: Fn(OutboundContext) -> OutboundContext + Send + Sync + 'static,
    {
        Self {
            name,
            decorate: Arc::new(decorate),
        }
    }

    /// Forces binary encoding.
    pub fn force_binary() -> Self {
        Self::new("force_binary", |mut ctx| {
            ctx.encoding = EncodingMode::Binary;
            ctx
        })
    }

    /// Forces structured encoding.
    pub fn force_structured() -> Self {
        Self::new("force_structured", |mut ctx| {
            ctx.encoding = EncodingMode::Structured;
            ctx
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn decorate(&self, ctx: OutboundContext) -> OutboundContext {
        (self.decorate)(ctx)
    }
}

impl std::fmt::Debug for ContextDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContextDecorator").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_decorator_wins_when_folded() {
        let chain = [
            ContextDecorator::force_binary(),
            ContextDecorator::force_structured(),
        ];
        let ctx = chain
            .iter()
            .fold(OutboundContext::default(), |ctx, d| d.decorate(ctx));
        assert_eq!(ctx.encoding, EncodingMode::Structured);
    }
}
