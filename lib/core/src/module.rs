use axum::Router;

/// A service module that contributes HTTP routes.
///
/// A business module implements this trait to register its API endpoints.
/// The binary entry point collects modules and merges their routes into a
/// single Router.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes as a self-contained Router.
    fn routes(&self) -> Router;
}
