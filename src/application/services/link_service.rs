//! Link creation and resolution service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::application::policy;
use crate::domain::entities::{AppConfig, Link, LinkKey, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{generate_slug, is_blacklisted};

const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// Service for creating and resolving short links.
///
/// Holds no mutable state: conflict detection and expiry are delegated to the
/// store's atomic primitives, so any number of requests may call into one
/// instance concurrently.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a link on behalf of an already authorized `app`.
    ///
    /// # Flow
    ///
    /// 1. Resolve the domain from the request or the app's default
    /// 2. Use the supplied slug or generate one, rejecting reserved slugs
    /// 3. Check the TTL against the app's bounds
    /// 4. Write `link:{domain}/{slug}` with `SET NX`, no expiry when `ttl == 0`
    ///
    /// The single store write is the only concurrency control: of several
    /// requests racing on one domain+slug, exactly one succeeds.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] for a disallowed/missing domain or a reserved slug
    /// - [`AppError::BadRequest`] when the TTL is outside the app's bounds
    /// - [`AppError::Conflict`] when the domain+slug is taken
    /// - [`AppError::Internal`] on store or slug-generation failures
    pub async fn create_link(&self, app: &AppConfig, new_link: NewLink) -> Result<Link, AppError> {
        let domain = policy::resolve_domain(app, new_link.domain.as_deref())?;

        let slug = match new_link.slug {
            Some(slug) => {
                if is_blacklisted(&slug) {
                    warn!(
                        app = app.display_name(),
                        domain = %domain,
                        slug = %slug,
                        "Rejected blacklisted slug"
                    );
                    return Err(AppError::forbidden("Slug is blacklisted"));
                }
                slug
            }
            None => self.generate_slug()?,
        };

        policy::check_ttl(app, new_link.ttl).inspect_err(|e| {
            warn!(
                app = app.display_name(),
                domain = %domain,
                slug = %slug,
                ttl = new_link.ttl,
                reason = %e,
                "Rejected link TTL"
            );
        })?;

        let link = Link {
            slug,
            domain,
            original_url: new_link.original_url,
            ttl: new_link.ttl,
        };

        info!(
            app = app.display_name(),
            domain = %link.domain,
            slug = %link.slug,
            url = %link.original_url,
            ttl = link.ttl,
            "Creating link"
        );

        let key = link.key();
        let expiry = (link.ttl != 0).then(|| Duration::from_secs(link.ttl));

        match self
            .repository
            .set_if_absent(&key, &link.original_url, expiry)
            .await
        {
            Ok(true) => Ok(link),
            Ok(false) => {
                warn!(domain = %link.domain, slug = %link.slug, "Link already exists");
                Err(AppError::conflict("Link already exists"))
            }
            Err(e) => {
                error!(
                    domain = %link.domain,
                    slug = %link.slug,
                    error = %e,
                    "Failed to store link"
                );
                Err(AppError::internal(SOMETHING_WENT_WRONG))
            }
        }
    }

    /// Looks up the original URL for `domain` + `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link exists (or it expired).
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve(&self, domain: &str, slug: &str) -> Result<String, AppError> {
        let key = LinkKey::new(domain, slug);

        match self.repository.get(&key).await {
            Ok(Some(url)) => Ok(url),
            Ok(None) => {
                info!(domain, slug, "Link not found");
                Err(AppError::not_found("Link not found"))
            }
            Err(e) => {
                error!(domain, slug, error = %e, "Failed to get link");
                Err(AppError::internal(SOMETHING_WENT_WRONG))
            }
        }
    }

    /// Returns true if the store answers a PING.
    pub async fn store_healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Store health check failed");
                false
            }
        }
    }

    /// Generates a random slug that is not blacklisted.
    ///
    /// Generated slugs are not checked for collisions here; a taken slug
    /// surfaces as a conflict from the store write.
    fn generate_slug(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let slug = generate_slug().map_err(|e| {
                error!(error = %e, "Failed to generate random slug");
                AppError::internal(SOMETHING_WENT_WRONG)
            })?;

            if !is_blacklisted(&slug) {
                return Ok(slug);
            }
        }

        error!("Failed to generate a non-reserved slug");
        Err(AppError::internal(SOMETHING_WENT_WRONG))
    }
}
