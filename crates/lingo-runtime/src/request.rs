#![forbid(unsafe_code)]

//! Request-scoped configuration resolution.
//!
//! The application supplies a [`RequestConfigSource`]: a function from the
//! request's locale to an [`IntlConfig`]. A [`RequestResolver`] checks the
//! locale against the routing table and hands out one [`RequestScope`] per
//! request. The scope calls the source lazily, at most once, and every
//! consumer during that request shares the result.
//!
//! Nothing here is global. Two requests never share a `RequestScope`, so
//! their configurations cannot leak into each other.
//!
//! ```
//! use lingo_catalog::Messages;
//! use lingo_runtime::{
//!     ConfigError, IntlConfig, RequestContext, RequestResolver, Routing, Values,
//! };
//!
//! let routing = Routing::from_tags(&["en", "de"], "en").unwrap();
//! let source = |request: &RequestContext| -> Result<IntlConfig, ConfigError> {
//!     let messages = Messages::new().with("greeting", "Hello, {name}");
//!     Ok(IntlConfig::new(request.locale.clone()).with_messages(messages))
//! };
//! let resolver = RequestResolver::new(routing, source);
//!
//! let request = resolver.begin("en").unwrap();
//! let t = request.scope().unwrap().translator(None);
//! assert_eq!(t.t("greeting", &Values::new().with("name", "Ada")), "Hello, Ada");
//! assert!(resolver.begin("fr").unwrap_err().is_not_found());
//! ```

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use lingo_catalog::Locale;

use crate::config::IntlConfig;
use crate::error::{ConfigError, ResolveError};
use crate::routing::Routing;
use crate::scope::IntlScope;

/// Inputs the config source sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// A supported locale.
    pub locale: Locale,
    /// Process-unique id, for correlating logs.
    pub request_id: u64,
}

/// Produces the configuration for a request.
pub trait RequestConfigSource: Send + Sync {
    fn load(&self, request: &RequestContext) -> Result<IntlConfig, ConfigError>;
}

impl<F> RequestConfigSource for F
where
    F: Fn(&RequestContext) -> Result<IntlConfig, ConfigError> + Send + Sync,
{
    fn load(&self, request: &RequestContext) -> Result<IntlConfig, ConfigError> {
        self(request)
    }
}

/// Validates locales and starts requests. Share one per application.
pub struct RequestResolver {
    routing: Routing,
    source: Arc<dyn RequestConfigSource>,
    next_id: AtomicU64,
}

impl RequestResolver {
    pub fn new(routing: Routing, source: impl RequestConfigSource + 'static) -> Self {
        Self::with_shared_source(routing, Arc::new(source))
    }

    pub fn with_shared_source(routing: Routing, source: Arc<dyn RequestConfigSource>) -> Self {
        Self {
            routing,
            source,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Start a request for `locale`.
    ///
    /// # Errors
    /// [`ResolveError::NotFound`] when the locale is not supported. The
    /// source is not called in that case.
    pub fn begin(&self, locale: &str) -> Result<RequestScope, ResolveError> {
        let Some(locale) = self.routing.find(locale) else {
            tracing::debug!(target: "lingo.request", locale, "unsupported locale");
            return Err(ResolveError::NotFound {
                locale: locale.to_owned(),
            });
        };
        Ok(self.start(locale.clone()))
    }

    /// Start a request for the best match of an `Accept-Language` value.
    pub fn begin_negotiated(&self, accept_language: Option<&str>) -> RequestScope {
        let locale = self.routing.negotiate(accept_language).clone();
        self.start(locale)
    }

    fn start(&self, locale: Locale) -> RequestScope {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RequestScope {
            context: RequestContext { locale, request_id },
            source: Arc::clone(&self.source),
            cell: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }
}

impl std::fmt::Debug for RequestResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestResolver")
            .field("routing", &self.routing)
            .finish_non_exhaustive()
    }
}

/// One request's lazily resolved configuration.
pub struct RequestScope {
    context: RequestContext,
    source: Arc<dyn RequestConfigSource>,
    cell: OnceLock<Result<IntlScope, ResolveError>>,
    loads: AtomicUsize,
}

impl RequestScope {
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn locale(&self) -> &Locale {
        &self.context.locale
    }

    /// The request's root scope, loading it on first call.
    ///
    /// A failed load is memoized too; later calls return the same error.
    pub fn scope(&self) -> Result<&IntlScope, ResolveError> {
        self.cell
            .get_or_init(|| self.load())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// How many times the source ran (0 or 1).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn load(&self) -> Result<IntlScope, ResolveError> {
        let span = tracing::debug_span!(
            target: "lingo.request",
            "intl.request.resolve",
            request_id = self.context.request_id,
            locale = self.context.locale.as_str(),
        );
        let _guard = span.enter();
        self.loads.fetch_add(1, Ordering::Relaxed);

        let config = self.source.load(&self.context).map_err(|source| {
            tracing::error!(target: "lingo.request", error = %source, "config source failed");
            ResolveError::Load {
                locale: self.context.locale.as_str().to_owned(),
                source: Arc::new(source),
            }
        })?;
        if config.locale != self.context.locale {
            tracing::debug!(
                target: "lingo.request",
                requested = self.context.locale.as_str(),
                returned = config.locale.as_str(),
                "config source chose a different locale"
            );
        }
        let scope = IntlScope::new(config);
        tracing::debug!(target: "lingo.request", "configuration resolved");
        Ok(scope)
    }
}

impl std::fmt::Debug for RequestScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScope")
            .field("context", &self.context)
            .field("resolved", &self.cell.get().is_some())
            .finish_non_exhaustive()
    }
}
