#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Border Sentry round.

use border_sentry_core::{ArenaSize, ConfigError, EngagementConfig};
use border_sentry_session::{query, Session};

/// Validates the round configuration and exposes start-up queries.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the round starts.
    #[must_use]
    pub fn welcome_banner(&self, session: &Session) -> &'static str {
        query::welcome_banner(session)
    }

    /// Exposes the arena dimensions required by the host adapter.
    #[must_use]
    pub fn arena(&self, session: &Session) -> ArenaSize {
        query::arena(session)
    }

    /// Checks an engagement configuration against the arena once, before
    /// the first tick.
    ///
    /// Configuration problems are start-up errors: per-tick code assumes a
    /// positive projectile speed and a border band that fits the arena, and
    /// never re-validates.
    pub fn validate(
        &self,
        config: &EngagementConfig,
        arena: ArenaSize,
    ) -> Result<(), ConfigError> {
        let speed = config.projectile_speed();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::NonPositiveProjectileSpeed { speed });
        }

        let depth = config.border_depth();
        if !depth.is_finite() || depth <= 0.0 {
            return Err(ConfigError::NonPositiveBorderDepth { depth });
        }

        if depth * 2.0 > arena.width() || depth * 2.0 > arena.height() {
            return Err(ConfigError::BorderExceedsArena {
                depth,
                width: arena.width(),
                height: arena.height(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Bootstrap;
    use border_sentry_core::{
        ArenaSize, ConfigError, EngagementConfig, FirePower, FirepowerPolicy, WELCOME_BANNER,
    };
    use border_sentry_session::Session;

    #[test]
    fn banner_matches_the_canonical_greeting() {
        let session = Session::new(EngagementConfig::default());
        assert_eq!(
            Bootstrap::default().welcome_banner(&session),
            WELCOME_BANNER
        );
    }

    #[test]
    fn default_configuration_is_valid() {
        let bootstrap = Bootstrap::default();
        let arena = ArenaSize::new(800.0, 600.0);
        assert!(bootstrap
            .validate(&EngagementConfig::default(), arena)
            .is_ok());
    }

    #[test]
    fn non_positive_border_depth_is_rejected() {
        let bootstrap = Bootstrap::default();
        let config = EngagementConfig::new(FirePower::maximum(), FirepowerPolicy::Fixed, 0.0);

        assert_eq!(
            bootstrap.validate(&config, ArenaSize::new(800.0, 600.0)),
            Err(ConfigError::NonPositiveBorderDepth { depth: 0.0 })
        );
    }

    #[test]
    fn oversized_border_band_is_rejected() {
        let bootstrap = Bootstrap::default();
        let config = EngagementConfig::new(FirePower::maximum(), FirepowerPolicy::Fixed, 400.0);

        assert_eq!(
            bootstrap.validate(&config, ArenaSize::new(800.0, 600.0)),
            Err(ConfigError::BorderExceedsArena {
                depth: 400.0,
                width: 800.0,
                height: 600.0,
            })
        );
    }
}
